use analytics::{best_worst_trades, AnalyticsEngine, AnalyticsError};
use core_types::CanonicalField;
use reporter::{generate_report, kpi_lines, ReportOptions};
use std::fs;
use std::path::PathBuf;

fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn csv_log_produces_metrics_rankings_and_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(
        &dir,
        "trades.csv",
        "Trade Date,Symbol,Side,Profit/Loss,RR\n\
         2024-01-02,ES,Long,10,2\n\
         2024-01-09,NQ,Short,-5,1.5\n\
         2024-02-01,ES,Long,20,3\n\
         2024-03-04,CL,Long,-5,\n\
         2024-03-05,ES,Short,-5,1\n",
    );

    let raw = ingest::load_csv_path(&csv).unwrap();
    let dataset = normalizer::process(raw).unwrap();
    let snapshot = AnalyticsEngine::new().calculate(&dataset).unwrap();

    assert_eq!(snapshot.total_trades, 5);
    assert_eq!(snapshot.wins, 2);
    assert!((snapshot.win_rate - 40.0).abs() < 1e-9);
    assert!((snapshot.total_pnl() - 15.0).abs() < 1e-9);
    assert!((snapshot.max_drawdown + 10.0).abs() < 1e-9);
    assert!((snapshot.avg_rr.unwrap() - 1.875).abs() < 1e-9);

    let ranking = best_worst_trades(&dataset, 2);
    assert_eq!(ranking.best[0].pnl, Some(20.0));
    assert_eq!(ranking.best[0].market, "ES");
    assert_eq!(ranking.worst.len(), 2);
    assert!(ranking.worst.iter().all(|t| t.pnl == Some(-5.0)));

    assert!(kpi_lines(&snapshot).iter().any(|l| l.value == "40.00%"));

    let options = ReportOptions {
        chart_size: (320, 200),
        ..ReportOptions::default()
    };
    let pdf = generate_report(&dataset, &snapshot, &options).unwrap();
    let out = dir.path().join("report.pdf");
    fs::write(&out, &pdf).unwrap();
    assert!(fs::read(&out).unwrap().starts_with(b"%PDF"));
}

#[test]
fn pnl_is_derived_from_prices_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(
        &dir,
        "prices.csv",
        "date,market,entry price,exit price,qty\n\
         2024-05-01,ES,100,110,2\n\
         2024-05-02,ES,100,95,1\n",
    );

    let dataset = normalizer::process(ingest::load_csv_path(&csv).unwrap()).unwrap();
    assert!(dataset.resolution().is_derived(CanonicalField::Pnl));

    let snapshot = AnalyticsEngine::new().calculate(&dataset).unwrap();
    assert_eq!(snapshot.pnl_series, vec![20.0, -5.0]);
    assert_eq!(snapshot.equity, vec![20.0, 15.0]);
}

#[test]
fn log_without_pnl_inputs_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, "notes.csv", "date,notes\n2024-01-01,flat day\n");

    let dataset = normalizer::process(ingest::load_csv_path(&csv).unwrap()).unwrap();
    assert_eq!(
        AnalyticsEngine::new().calculate(&dataset),
        Err(AnalyticsError::MissingRequiredField(CanonicalField::Pnl))
    );
}
