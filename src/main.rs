use anyhow::Context as AnyhowContext;
use record_parsing::{extract_document, Schema};
use scraper::Html;
use std::env;
use std::io::Write;

static USAGE: &str = "Usage: record-parsing <schema.yaml> <page.html> [json|csv]";

fn main() -> Result<(), anyhow::Error> {
    if let Err(env::VarError::NotPresent) = env::var("RUST_LOG") {
        env::set_var("RUST_LOG", "INFO,html5ever=error");
    }
    pretty_env_logger::formatted_timed_builder()
        .parse_default_env()
        .init();

    let mut args = env::args().skip(1);
    let schema_path = args.next().context(USAGE)?;
    let page_path = args.next().context(USAGE)?;
    let format = args.next().unwrap_or_else(|| "json".to_string());

    let schema: Schema = serde_yaml::from_str(&std::fs::read_to_string(&schema_path)?)
        .context(format!("Unable to parse schema {schema_path}"))?;
    let body = std::fs::read_to_string(&page_path)
        .context(format!("Unable to read page {page_path}"))?;
    let document = Html::parse_document(&body);
    let records = extract_document(&document, &schema)?;
    log::info!("{} records extracted from {page_path}", records.len());

    let stdout = std::io::stdout();
    match format.as_str() {
        "json" => {
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &records)?;
            writeln!(out)?;
        }
        "csv" => {
            let mut wtr = csv::Writer::from_writer(stdout.lock());
            wtr.write_record(schema.fields.iter().map(|f| f.name.as_str()))?;
            for record in &records {
                wtr.write_record(record.iter().map(|(_, v)| v.unwrap_or_default()))?;
            }
            wtr.flush()?;
        }
        other => return Err(anyhow::anyhow!("Unknown output format {other}")),
    }
    Ok(())
}
