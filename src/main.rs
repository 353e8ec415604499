use std::process::ExitCode;

mod aggregate;
mod cli;
mod config;
mod descriptor;
mod driver;
mod error;
mod romanize;
mod runtime;
mod tags;
mod tracklist;
mod transcode;

fn main() -> ExitCode {
    runtime::run()
}
