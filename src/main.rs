use anyhow::Result;
use clap::Parser;
use mesa_scraper::cli::{Cli, Command};
use mesa_scraper::{logging, run_extraction, FetchApp};
use std::path::Path;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志
    logging::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 加载配置
    let config = cli.load_config()?;

    match cli.command {
        Command::Extract { .. } => {
            logging::log_startup("ID 提取");
            run_extraction(&config).await?;
        }
        Command::Fetch { .. } => {
            logging::log_startup("省参议员结果抓取");
            let csv_path = config.extracted_ids_file.clone();
            let structure_path = config.structure_file.clone();

            let mut app = FetchApp::initialize(config)?;
            let report = app
                .load_inputs(Path::new(&csv_path), Path::new(&structure_path))
                .await?;
            app.run(&report, std::io::stdin().lock()).await?;
        }
    }

    Ok(())
}
