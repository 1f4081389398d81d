//! desk-runner: headless runner for the RiskDesk engine.
//!
//! Usage:
//!   desk-runner --accounts book.json --lob LCB,MCB --rating AAA
//!   desk-runner --config desk.json --db desk.db --page overview --json
//!   desk-runner --baseline last_month.json --slice industry:npa_exposure --rank npa_exposure
//!   desk-runner --ipc-mode            (one JSON command per stdin line)

use anyhow::{anyhow, Result};
use riskdesk_core::{
    breakdown::{sorted_desc, SliceMetric},
    config::DeskConfig,
    dimension::Dimension,
    filter_state::FilterAction,
    ranking::RankMetric,
    session::DeskSession,
    source::{AccountSource, JsonFileSource},
    sample::SamplePortfolio,
    view::DashboardView,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Action { action: FilterAction },
    Slice { dimension: Dimension, metric: SliceMetric },
    Table,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_out = args.iter().any(|a| a == "--json");

    let mut config = match arg_value(&args, "--config") {
        Some(path) => DeskConfig::load(path)?,
        None => DeskConfig::default(),
    };
    if let Some(db) = arg_value(&args, "--db") {
        config.storage.db_path = Some(db.to_string());
    }
    config.top_n = parse_arg(&args, "--top", config.top_n).max(1);
    if let Some(anchor) = arg_value(&args, "--anchor") {
        config.trend.anchor = Some(chrono::NaiveDate::parse_from_str(anchor, "%Y-%m-%d")?);
    }

    let mut source: Box<dyn AccountSource> = match arg_value(&args, "--accounts") {
        Some(path) => Box::new(JsonFileSource::new(path, config.strict_source)),
        None => Box::new(SamplePortfolio::new(config.sample.accounts, config.sample.seed)),
    };

    if !ipc_mode && !json_out {
        println!("RiskDesk — desk-runner");
        println!("  accounts:  {}", arg_value(&args, "--accounts").unwrap_or("(sample portfolio)"));
        println!("  db:        {}", config.storage.db_path.as_deref().unwrap_or("(memory)"));
        println!("  top n:     {}", config.top_n);
        println!();
    }

    let slice = arg_value(&args, "--slice").map(parse_slice).transpose()?;
    let rank = arg_value(&args, "--rank")
        .map(|key| RankMetric::from_key(key).ok_or_else(|| anyhow!("unknown rank metric: {key}")))
        .transpose()?;

    let mut session = DeskSession::build(config, source.as_mut())?;
    if let Some(path) = arg_value(&args, "--baseline") {
        let strict = session.config().strict_source;
        let prior = JsonFileSource::new(path, strict).load()?;
        session = session.with_baseline(prior);
    }
    let actions = cli_actions(&args);
    log::info!("runner: {} filter action(s) from flags", actions.len());
    for action in actions {
        session.dispatch(action);
    }

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else if json_out {
        println!("{}", serde_json::to_string_pretty(&session.dashboard())?);
    } else {
        print_summary(&session.dashboard());
        if let Some((dimension, metric)) = slice {
            print_slice(&session, dimension, metric);
        }
        if let Some(metric) = rank {
            print_ranking(&session, metric);
        }
    }

    Ok(())
}

/// Global filters, search, and page selection given on the command line.
fn cli_actions(args: &[String]) -> Vec<FilterAction> {
    let mut actions = Vec::new();
    if let Some(v) = arg_list(args, "--lob") {
        actions.push(FilterAction::SetLob { values: v });
    }
    if let Some(v) = arg_list(args, "--party-type") {
        actions.push(FilterAction::SetPartyType { values: v });
    }
    if let Some(v) = arg_list(args, "--rating") {
        actions.push(FilterAction::SetRating { values: v });
    }
    if let Some(v) = arg_list(args, "--asset-class") {
        actions.push(FilterAction::SetAssetClassification { values: v });
    }
    if let Some(term) = arg_value(args, "--search") {
        actions.push(FilterAction::SetSearch { term: term.to_string() });
    }
    if let Some(page) = arg_value(args, "--page") {
        actions.push(FilterAction::SetActivePage { page: Some(page.to_string()) });
    }
    actions
}

fn run_ipc_loop(session: &mut DeskSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("runner: bad ipc command: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&session.dashboard())?)?;
            }
            IpcCommand::Action { action } => {
                session.dispatch(action);
                writeln!(stdout, "{}", serde_json::to_string(&session.dashboard())?)?;
            }
            IpcCommand::Slice { dimension, metric } => {
                let entries = session.slice(dimension, metric);
                writeln!(stdout, "{}", serde_json::to_string(&entries)?)?;
            }
            IpcCommand::Table => {
                writeln!(stdout, "{}", serde_json::to_string(&session.table())?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(view: &DashboardView) {
    println!("=== PORTFOLIO ({} of {} accounts) ===", view.filtered_count, view.universe_count);
    for chip in &view.active_filters {
        println!("  filter: {:?} {} = {}", chip.layer, chip.field, chip.value);
    }
    println!();

    println!("=== KPIs ===");
    for m in view.kpis.metrics() {
        let status = m
            .threshold
            .map(|t| format!("{:?}", t.status).to_lowercase())
            .unwrap_or_default();
        println!("  {:<16} {:>12.2}  {}", m.label, m.value, status);
    }
    println!();

    println!("=== EXPOSURE BY REGION ===");
    for e in sorted_desc(view.breakdowns.exposure_by_region.clone()) {
        println!("  {:<12} {:>12.2}  {:>5.1}%", e.label, e.value, e.percentage);
    }
    println!();

    println!("=== DELINQUENCY MATRIX (count / exposure) ===");
    println!("  {:<8} {}", "", view.matrix.buckets.join(" | "));
    for row in &view.matrix.data {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|c| format!("{}/{:.0}", c.count, c.exposure))
            .collect();
        println!("  {:<8} {}", row.region, cells.join(" | "));
    }
    let totals: Vec<String> = view
        .matrix
        .bucket_totals()
        .iter()
        .map(|c| format!("{}/{:.0}", c.count, c.exposure))
        .collect();
    println!("  {:<8} {}", "TOTAL", totals.join(" | "));
    println!();

    println!("=== TOP {} EXPOSURES ===", view.top_exposures.len());
    for r in &view.top_exposures {
        println!(
            "  {:>3}. {:<40} {} {:>12.2} {:>5.1}%  util {:>5.1}%",
            r.rank, r.name, r.account_ref, r.amount, r.portfolio_pct, r.utilization_pct
        );
    }
    println!();

    println!("=== TREND ===");
    for p in &view.trend {
        println!(
            "  {} | NPA {:>5.2}% | PAR {:>5.2}% | exposure {:.0}",
            p.period, p.npa, p.par, p.exposure
        );
    }
}

fn print_slice(session: &DeskSession, dimension: Dimension, metric: SliceMetric) {
    println!();
    println!("=== {} BY {} ===", metric.key().to_uppercase(), dimension.label().to_uppercase());
    for e in sorted_desc(session.slice(dimension, metric)) {
        println!("  {:<24} {:>12.2}  {:>5.1}%", e.label, e.value, e.percentage);
    }
}

fn print_ranking(session: &DeskSession, metric: RankMetric) {
    println!();
    println!("=== TOP {} ===", metric.key().to_uppercase());
    for r in session.top_exposures(session.config().top_n, metric) {
        println!(
            "  {:>3}. {:<40} {} {:>12.2} {:>5.1}%",
            r.rank, r.name, r.account_ref, r.amount, r.portfolio_pct
        );
    }
}

/// `dimension[:metric]`, e.g. `region:count`. The metric defaults to exposure.
fn parse_slice(value: &str) -> Result<(Dimension, SliceMetric)> {
    let (dim_key, metric_key) = value.split_once(':').unwrap_or((value, ""));
    let dimension: Dimension = dim_key.trim().parse()?;
    let metric = match metric_key.trim() {
        "" => SliceMetric::default(),
        key => SliceMetric::from_key(key).ok_or_else(|| anyhow!("unknown slice metric: {key}"))?,
    };
    Ok((dimension, metric))
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Comma-separated values for a multi-select flag.
fn arg_list(args: &[String], flag: &str) -> Option<Vec<String>> {
    arg_value(args, flag).map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_flag_parses_dimension_and_metric() {
        assert_eq!(parse_slice("region:count").unwrap(), (Dimension::Region, SliceMetric::Count));
        assert_eq!(
            parse_slice("productType:npa_exposure").unwrap(),
            (Dimension::ProductType, SliceMetric::NpaExposure)
        );
        assert_eq!(parse_slice("segment").unwrap(), (Dimension::Segment, SliceMetric::Exposure));
    }

    #[test]
    fn slice_flag_rejects_unknown_keys() {
        assert!(parse_slice("shoe_size:count").is_err());
        assert!(parse_slice("region:volume").is_err());
    }
}
