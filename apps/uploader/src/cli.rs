use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::controller::{PageState, UploadEvent};
use crate::models::upload::DEFAULT_OPTION_IDS;
use crate::models::SelectedFile;
use crate::session::SessionStore;
use crate::state::{AppState, PageController};

#[derive(Parser)]
#[command(about = "uploads resumes for structured extraction", version)]
struct Cmd {
    #[command(subcommand)]
    command: SubCommandType,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Upload a resume and show the extracted fields
    Parse {
        file: PathBuf,
        /// Extraction option to request; repeat for several
        #[arg(
            short,
            long = "option",
            value_parser = PossibleValuesParser::new(DEFAULT_OPTION_IDS.iter().copied())
        )]
        options: Vec<String>,
        /// Hand the file over through the drop zone instead of the picker
        #[arg(long)]
        drop: bool,
        /// Also write resume-analysis.json to DOWNLOAD_DIR
        #[arg(long)]
        download: bool,
    },
    /// Show the results stored for this session
    Show,
    /// Write the stored results to DOWNLOAD_DIR
    Export,
    /// End the session and forget stored results
    Clear,
}

pub async fn run(state: AppState) -> Result<()> {
    let args = Cmd::parse();
    let mut controller = state.into_controller();
    match args.command {
        SubCommandType::Parse {
            file,
            options,
            drop,
            download,
        } => {
            let selected = read_file(&file).await?;
            controller.dispatch(UploadEvent::PageLoad).await;
            if drop {
                controller.dispatch(UploadEvent::DragEnter).await;
                controller.dispatch(UploadEvent::DragOver).await;
                controller.dispatch(UploadEvent::Drop(vec![selected])).await;
            } else {
                controller
                    .dispatch(UploadEvent::FilesChanged(vec![selected]))
                    .await;
            }
            for id in options {
                controller
                    .dispatch(UploadEvent::OptionToggled { id, checked: true })
                    .await;
            }
            controller.dispatch(UploadEvent::Submit).await;
            print_results(controller.page());
            if download && controller.page().results_visible {
                controller.dispatch(UploadEvent::Download).await;
                print_download(controller.page());
            }
        }
        SubCommandType::Show => {
            controller.dispatch(UploadEvent::PageLoad).await;
            if !print_results(controller.page()) {
                println!("No stored results for this session");
            }
        }
        SubCommandType::Export => {
            controller.dispatch(UploadEvent::PageLoad).await;
            controller.dispatch(UploadEvent::Download).await;
            print_download(controller.page());
        }
        SubCommandType::Clear => {
            controller.store().clear().await?;
            info!("Session cleared");
        }
    }
    report_alerts(&mut controller)
}

async fn read_file(path: &Path) -> Result<SelectedFile> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile::new(name, content))
}

/// Returns false when the results region is hidden.
fn print_results(page: &PageState) -> bool {
    if !page.results_visible {
        return false;
    }
    for (_, heading, text) in page.results.regions() {
        println!("{heading}");
        println!("{}", "-".repeat(heading.len()));
        println!("{text}");
        println!();
    }
    true
}

fn print_download(page: &PageState) {
    if let Some(path) = &page.last_download {
        println!("Saved {}", path.display());
    }
}

fn report_alerts(controller: &mut PageController) -> Result<()> {
    let alerts = controller.take_alerts();
    for alert in &alerts {
        eprintln!("{alert}");
    }
    if !alerts.is_empty() {
        bail!("{} alert(s) raised", alerts.len());
    }
    Ok(())
}
