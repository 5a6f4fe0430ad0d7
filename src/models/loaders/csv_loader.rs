use crate::error::{Result, ScrapeError};
use crate::models::mesa::MesaRecord;
use crate::models::nomenclature::ExtractedRecord;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 代码所在列（第二列，从 0 开始）
pub const CODE_COLUMN: usize = 1;

/// 读取 CSV 中每一行的 co（跳过表头，按列位置读取，不看表头名称）
pub async fn read_code_column(path: &Path) -> Result<Vec<String>> {
    let content = read_bytes(path).await?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_slice());

    let mut codes = Vec::new();
    for record in reader.records() {
        let record = record?;
        let code = record.get(CODE_COLUMN).ok_or_else(|| ScrapeError::MalformedRow {
            line: record.position().map_or(0, |p| p.line()),
            reason: format!("只有 {} 列，缺少第 {} 列", record.len(), CODE_COLUMN + 1),
        })?;
        codes.push(code.trim().to_string());
    }

    Ok(codes)
}

/// 写出提取结果，表头固定为 co,id2_intermedio,id3_intermedio
pub async fn write_extracted(path: &Path, records: &[ExtractedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    if records.is_empty() {
        writer.write_record(["co", "id2_intermedio", "id3_intermedio"])?;
    }

    let content = writer
        .into_inner()
        .map_err(|e| ScrapeError::io(path.display().to_string(), e.into_error()))?;
    fs::write(path, content)
        .await
        .map_err(|e| ScrapeError::io(path.display().to_string(), e))
}

/// 提取结果 CSV 的一行，按表头名称读取
#[derive(Debug, Deserialize)]
struct EnrichedRow {
    co: String,
    #[serde(default)]
    id2_intermedio: Option<String>,
}

/// 加载带参议员 ID 的投票桌
///
/// ID 为空、空白或 "-1" 的行会被跳过
pub async fn load_mesas(path: &Path) -> Result<Vec<MesaRecord>> {
    let content = read_bytes(path).await?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_slice());

    let mut mesas = Vec::new();
    for row in reader.deserialize::<EnrichedRow>() {
        let row = row?;
        let Some(id) = row.id2_intermedio.as_deref().map(str::trim) else {
            continue;
        };
        if id.is_empty() || id == "-1" {
            continue;
        }

        let id_senador = id
            .parse::<i64>()
            .map_err(|_| ScrapeError::data_integrity(&row.co, id))?;
        mesas.push(MesaRecord {
            co: row.co,
            id_senador,
        });
    }

    Ok(mesas)
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .await
        .map_err(|e| ScrapeError::io(path.display().to_string(), e))
}
