use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bank-cli",
    author,
    version,
    about = "A menu-driven personal bank",
    long_about = None,
    after_help = "STATE:\n    The bank is loaded from the store file at startup and saved back\n    after every successful operation. Debug activity is appended to the\n    log file as timestamp|level|message lines."
)]
pub struct Args {
    /// Path to the bank store file
    #[arg(long, value_name = "FILE", default_value = "bank.json")]
    pub store: PathBuf,

    /// Path to the debug log file
    #[arg(long, value_name = "FILE", default_value = "bank.log")]
    pub log_file: PathBuf,
}
