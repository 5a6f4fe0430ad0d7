//! 命令行参数

use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mesa_scraper")]
#[command(about = "提取投票桌 ID 并下载省参议员选举结果")]
pub struct Cli {
    /// TOML 配置文件
    #[arg(short, long, global = true, env = "MESA_SCRAPER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 命名表 + 投票桌 CSV → 带中间 ID 的 CSV
    Extract {
        #[arg(long)]
        nomenclator: Option<String>,
        /// 投票桌 CSV（co 在第二列）
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// 带 ID 的 CSV + 结构文档 → 结果 JSON
    Fetch {
        #[arg(long)]
        structure: Option<String>,
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        errors: Option<String>,
        #[arg(long)]
        sample_size: Option<usize>,
        /// 跳过交互式确认
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

impl Cli {
    /// 配置文件（或环境变量）为基础，命令行参数覆盖
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::from_env(),
        };

        match &self.command {
            Command::Extract {
                nomenclator,
                input,
                output,
            } => {
                override_with(&mut config.nomenclator_file, nomenclator);
                override_with(&mut config.mesas_file, input);
                override_with(&mut config.extracted_ids_file, output);
            }
            Command::Fetch {
                structure,
                input,
                output,
                errors,
                sample_size,
                yes,
            } => {
                override_with(&mut config.structure_file, structure);
                override_with(&mut config.extracted_ids_file, input);
                override_with(&mut config.results_file, output);
                override_with(&mut config.errors_file, errors);
                if let Some(size) = sample_size {
                    config.sample_size = *size;
                }
                config.auto_confirm |= *yes;
            }
        }

        Ok(config)
    }
}

fn override_with(field: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        *field = v.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_overrides() {
        let cli = Cli::try_parse_from([
            "mesa_scraper", "fetch", "--input", "ids.csv", "--sample-size", "5", "-y",
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.extracted_ids_file, "ids.csv");
        assert_eq!(config.sample_size, 5);
        assert!(config.auto_confirm);
    }

    #[test]
    fn test_extract_overrides() {
        let cli = Cli::try_parse_from(["mesa_scraper", "extract", "-o", "out.csv"]).unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.extracted_ids_file, "out.csv");
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["mesa_scraper"]).is_err());
    }
}
