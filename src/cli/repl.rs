use crate::cli::commands::{self, Command, HELP};
use crate::cli::input::load_files;
use crate::cli::output::OutputStyle;
use crate::core::status::AnalysisStatus;
use crate::orchestrator::session::Session;
use crate::service::AnalysisService;
use anyhow::Error;
use std::ops::ControlFlow;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads commands from stdin until `quit` or end of input.
pub async fn run<S: AnalysisService>(
    session: &mut Session<S>,
    style: &OutputStyle,
) -> Result<(), Error> {
    println!("{}", style.info(&format!("{}. Type `help` for commands.", session.summary())));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{}", style.warning(&err.to_string()));
                continue;
            }
        };
        if execute(session, command, style).await.is_break() {
            break;
        }
    }
    Ok(())
}

pub async fn execute<S: AnalysisService>(
    session: &mut Session<S>,
    command: Command,
    style: &OutputStyle,
) -> ControlFlow<()> {
    match command {
        Command::Empty => {}
        Command::Add(paths) => upload(session, &paths, style).await,
        Command::Remove(prefix) => {
            match commands::resolve_id(session.registry(), &prefix) {
                Ok(id) => {
                    if session.remove_image(&id) {
                        println!("{}", style.success(&format!("Removed. {}", session.summary())));
                    }
                }
                Err(err) => println!("{}", style.warning(&err.to_string())),
            }
        }
        Command::Clear => {
            let removed = session.clear_all();
            println!("{}", style.success(&format!("Cleared {} image(s)", removed)));
        }
        Command::List => {
            println!("{}", session.summary());
            let registry = session.registry();
            for record in registry.iter() {
                let preview = registry.preview(record);
                println!("{}", style.record(record, preview.as_ref()));
            }
        }
        Command::Prompt(None) => println!("{}", session.prompt()),
        Command::Prompt(Some(prompt)) => {
            session.set_prompt(prompt);
            println!("{}", style.success("Prompt updated"));
        }
        Command::Analyze => analyze(session, style, false).await,
        Command::Retry => analyze(session, style, true).await,
        Command::Status => println!("{}", style.status(session.state())),
        Command::Raw => match session.state().result() {
            Some(result) => println!("{}", result),
            None => println!("{}", style.warning("No result yet")),
        },
        Command::Help => println!("{}", HELP),
        Command::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

pub async fn upload<S: AnalysisService>(
    session: &mut Session<S>,
    paths: &[PathBuf],
    style: &OutputStyle,
) {
    let report = load_files(paths).await;
    for (path, err) in &report.failures {
        println!("{}", style.warning(&format!("Could not read {}: {}", path.display(), err)));
    }

    let added = session.select_images(report.files);
    if !added.is_empty() {
        println!(
            "{}",
            style.success(&format!("Added {}. {}", added.len(), session.summary()))
        );
    }
}

/// Runs one analysis and prints either the rendered result or the error.
pub async fn analyze<S: AnalysisService>(
    session: &mut Session<S>,
    style: &OutputStyle,
    retry: bool,
) {
    if session.registry().is_empty() {
        println!("{}", style.warning("Upload images to start"));
        return;
    }

    println!("{}", style.info("Analyzing..."));
    let status = if retry {
        session.retry().await
    } else {
        session.analyze().await
    };

    println!("{}", style.status(session.state()));
    if status == AnalysisStatus::Success {
        if let Some(blocks) = session.rendered_result() {
            println!("{}", style.blocks(&blocks));
        }
    }
}
