//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - CSV → 过滤 → 聚合 → 渲染 的端到端测试
//! - 错误阶段映射

#[cfg(test)]
mod fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};

    pub const HEADER: &str = "Order ID,Order Date,Region,Category,State,Product Name,Sales,Profit";

    /// Superstore-shaped rows; the last product name is windows-1252 encoded
    pub fn orders_csv() -> Vec<u8> {
        let mut bytes = format!(
            "{HEADER}\r\n\
             CA-1,11/8/2016,South,Furniture,Kentucky,Bookcase,261.96,41.9136\r\n\
             CA-1,11/8/2016,South,Furniture,Kentucky,Chair,731.94,219.582\r\n\
             CA-2,6/12/2016,West,Office Supplies,California,Labels,14.62,6.8714\r\n\
             US-3,10/11/2015,South,Furniture,Florida,Table,957.5775,-383.031\r\n\
             US-3,10/11/2015,South,Office Supplies,Florida,Storage,22.368,2.5164\r\n\
             CA-4,6/9/2014,West,Technology,California,Phone,907.152,90.7152\r\n"
        )
        .into_bytes();
        bytes.extend_from_slice(b"CA-5,6/9/2014,East,Technology,New York,Caf\xe9 Phone,100,10\r\n");
        bytes
    }

    /// Writes the CSV and a config next to it; returns the config path
    pub fn write_workspace(dir: &Path, extra_config: &str) -> PathBuf {
        fs::write(dir.join("orders.csv"), orders_csv()).unwrap();
        let config = dir.join("report.toml");
        fs::write(
            &config,
            format!("[source]\npath = \"orders.csv\"\nencoding = \"latin1\"\n{extra_config}"),
        )
        .unwrap();
        config
    }
}

#[cfg(test)]
mod contract_tests {
    use contracts::{AggregateResults, Amount, FilterSelection, ReportFrame, INSIGHTS};

    #[test]
    fn test_frame_json_shape() {
        let frame = ReportFrame::new(
            3,
            "Superstore Sales Dashboard",
            FilterSelection::new(["East"], ["Technology"]),
            AggregateResults {
                record_count: 1,
                total_sales: Amount::from_units(100),
                order_count: 1,
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&frame).unwrap();

        assert_eq!(value["render_id"], 3);
        assert_eq!(value["results"]["order_count"], 1);
        assert_eq!(value["insights"].as_array().unwrap().len(), INSIGHTS.len());
        assert!(value["results"]["sales_by_state"].is_null());
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;

    use chrono::NaiveDate;
    use config_loader::ConfigLoader;
    use contracts::{Amount, Dimension, FilterSelection, GroupTotal, PipelineStage};
    use ingestion::{IngestionError, OrderLoader};
    use pretty_assertions::assert_eq;
    use presenter::{render_report, Layout, Presenter};
    use report_engine::ReportSession;
    use tempfile::tempdir;

    use crate::fixtures::write_workspace;

    fn amount(value: f64) -> Amount {
        Amount::from_f64(value).unwrap()
    }

    /// End-to-end: config → load (windows-1252) → session → filter → aggregate
    #[test]
    fn test_e2e_region_selection() {
        let dir = tempdir().unwrap();
        let config = write_workspace(dir.path(), "");

        let blueprint = ConfigLoader::load_from_path(&config).unwrap();
        let records = OrderLoader::new(blueprint.source.clone())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(records.len(), 7);
        assert_eq!(records[6].product_name, "Café Phone");
        assert_eq!(records[0].calendar.year, 2016);
        assert_eq!(records[0].calendar.month, "Nov");

        let mut session = ReportSession::new(records, &blueprint.report);
        let full = session.refresh();
        assert_eq!(full.results.total_sales, amount(2995.6175));
        assert_eq!(full.results.order_count, 5);

        let south = session
            .selection()
            .clone()
            .with_values(Dimension::Region, ["South"]);
        let frame = session.on_selection_changed(south).unwrap();
        let results = &frame.results;

        assert_eq!(results.record_count, 4);
        assert_eq!(results.total_sales, amount(1973.8455));
        assert_eq!(results.total_profit, amount(-119.019));
        assert_eq!(results.order_count, 2);
        assert_eq!(
            results.sales_by_category,
            vec![
                GroupTotal::new("Furniture", amount(1951.4775)),
                GroupTotal::new("Office Supplies", amount(22.368)),
            ]
        );
        assert_eq!(
            results
                .top_products
                .iter()
                .map(|g| g.key.as_str())
                .collect::<Vec<_>>(),
            vec!["Table", "Chair", "Bookcase", "Storage"]
        );
        assert_eq!(results.sales_over_time.len(), 2);
        assert_eq!(
            results.sales_over_time[0].date,
            NaiveDate::from_ymd_opt(2015, 10, 11).unwrap()
        );
        assert_eq!(results.sales_over_time[1].sales, amount(993.9));
        assert!(results.sales_by_state.is_none());

        let text = render_report(&frame, &Layout::default());
        assert!(text.contains("$1,973"));
        assert!(text.contains("-$119"));
    }

    #[test]
    fn test_e2e_empty_category_selection() {
        let dir = tempdir().unwrap();
        let config = write_workspace(dir.path(), "");
        let blueprint = ConfigLoader::load_from_path(&config).unwrap();
        let records = OrderLoader::new(blueprint.source.clone())
            .unwrap()
            .load()
            .unwrap();

        let mut session = ReportSession::new(records, &blueprint.report);
        let none = session
            .selection()
            .clone()
            .with_values(Dimension::Category, Vec::<String>::new());
        let frame = session.on_selection_changed(none).unwrap();

        assert!(frame.results.is_empty());
        assert_eq!(frame.results.total_sales, Amount::ZERO);
        assert_eq!(frame.results.order_count, 0);
        assert!(frame.results.sales_by_category.is_empty());
        assert!(frame.results.top_products.is_empty());
    }

    #[test]
    fn test_e2e_json_sink_and_state_map() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out").join("report.json");
        let config = write_workspace(
            dir.path(),
            &format!(
                "\n[report]\nshow_state_map = true\ntop_n = 2\n\n\
                 [[sinks]]\nname = \"json\"\nsink_type = \"json\"\nparams = {{ path = \"{}\" }}\n\n\
                 [[sinks]]\nname = \"log\"\nsink_type = \"log\"\n",
                out.display().to_string().replace('\\', "/")
            ),
        );

        let blueprint = ConfigLoader::load_from_path(&config).unwrap();
        let records = OrderLoader::new(blueprint.source.clone())
            .unwrap()
            .load()
            .unwrap();
        let mut session = ReportSession::new(records, &blueprint.report);
        let mut presenter = Presenter::from_configs(&blueprint.sinks).unwrap();

        let west = FilterSelection::new(["West"], ["Technology", "Office Supplies"]);
        let frame = session.on_selection_changed(west).unwrap();
        presenter.render(&frame).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        let results = &value["results"];
        assert_eq!(results["record_count"], 2);
        assert_eq!(results["top_products"].as_array().unwrap().len(), 2);
        assert_eq!(results["top_products"][0]["key"], "Phone");
        assert_eq!(results["sales_by_state"][0]["key"], "California");
        assert!((results["total_sales"].as_f64().unwrap() - 921.772).abs() < 1e-9);
    }

    #[test]
    fn test_e2e_unknown_selection_keeps_previous() {
        let dir = tempdir().unwrap();
        let config = write_workspace(dir.path(), "");
        let blueprint = ConfigLoader::load_from_path(&config).unwrap();
        let records = OrderLoader::new(blueprint.source.clone())
            .unwrap()
            .load()
            .unwrap();
        let mut session = ReportSession::new(records, &blueprint.report);
        let before = session.selection().clone();

        let err = session
            .on_selection_changed(FilterSelection::new(["Central"], ["Furniture"]))
            .unwrap_err();
        assert_eq!(err.stage(), PipelineStage::Filter);
        assert_eq!(session.selection(), &before);
    }

    #[test]
    fn test_e2e_bad_date_aborts_load() {
        let dir = tempdir().unwrap();
        let config = write_workspace(dir.path(), "");
        let mut csv = fs::read(dir.path().join("orders.csv")).unwrap();
        csv.extend_from_slice(b"CA-6,not a date,East,Technology,Ohio,Pen,1,1\r\n");
        fs::write(dir.path().join("orders.csv"), csv).unwrap();

        let blueprint = ConfigLoader::load_from_path(&config).unwrap();
        let err = OrderLoader::new(blueprint.source.clone())
            .unwrap()
            .load()
            .unwrap_err();

        assert_eq!(err.stage(), PipelineStage::Parse);
        match err {
            IngestionError::DateParse { row, value, .. } => {
                assert_eq!(row, 8);
                assert_eq!(value, "not a date");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_e2e_wrong_encoding_fails_load() {
        let dir = tempdir().unwrap();
        let config = write_workspace(dir.path(), "");
        let mut blueprint = ConfigLoader::load_from_path(&config).unwrap();
        blueprint.source.encoding = "utf-8".to_string();

        let err = OrderLoader::new(blueprint.source.clone())
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, IngestionError::Decode { .. }));
        assert_eq!(err.stage(), PipelineStage::Load);
    }

    #[test]
    fn test_e2e_session_metrics() {
        let dir = tempdir().unwrap();
        let config = write_workspace(dir.path(), "");
        let blueprint = ConfigLoader::load_from_path(&config).unwrap();
        let records = OrderLoader::new(blueprint.source.clone())
            .unwrap()
            .load()
            .unwrap();
        let mut session = ReportSession::new(records, &blueprint.report);
        let mut metrics = observability::SessionMetrics::new();

        metrics.update(&session.refresh(), 1.0);
        let none = FilterSelection::new(Vec::<String>::new(), ["Furniture"]);
        metrics.update(&session.on_selection_changed(none).unwrap(), 0.5);

        let summary = metrics.summary();
        assert_eq!(summary.renders, 2);
        assert_eq!(summary.empty_renders, 1);
    }
}
