use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lsa", about = "Leadership self-assessment in the terminal")]
#[command(version)]
pub(crate) struct Cli {
    /// lsa-api server used for saving and browsing assessments
    #[arg(long, global = true, env = "LSA_SERVER_URL")]
    pub(crate) server: Option<String>,

    /// Folder holding the local result snapshot
    #[arg(long, global = true, env = "LSA_ROOT_FOLDER")]
    pub(crate) root_folder: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Answer the questionnaire and see your results
    Take(Take),

    /// Score answers from a JSON file ({"q1_1": 4, ...})
    Score(Score),

    /// Show the last result saved on this machine
    Show,

    /// Forget the last result saved on this machine
    Reset,

    /// List assessments saved on the server
    History,

    /// List users known to the server
    Users,

    /// Show one assessment saved on the server
    View(View),

    /// List every question by dimension
    Questions,
}

#[derive(Debug, Parser)]
pub(crate) struct Persist {
    /// Store the assessment on the server
    #[arg(long)]
    pub(crate) save: bool,

    /// Append the result to the server's CSV file
    #[arg(long)]
    pub(crate) csv: bool,

    /// Manager name recorded in the CSV file
    #[arg(long)]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Parser)]
pub(crate) struct Take {
    #[command(flatten)]
    pub(crate) persist: Persist,
}

#[derive(Debug, Parser)]
pub(crate) struct Score {
    /// JSON object mapping question ids to answers
    #[arg(long)]
    pub(crate) answers: PathBuf,

    #[command(flatten)]
    pub(crate) persist: Persist,
}

#[derive(Debug, Parser)]
pub(crate) struct View {
    pub(crate) id: i64,
}
