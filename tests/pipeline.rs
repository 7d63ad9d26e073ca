use std::path::{Path, PathBuf};

use shipping_dashboard::data::aggregate::count_by_warehouse;
use shipping_dashboard::data::loader::load_file;
use shipping_dashboard::page::PAGE_FILE;
use shipping_dashboard::{run, DashboardConfig, DashboardError};

const HEADER: &str = "ID,Warehouse_block,Mode_of_Shipment,Customer_care_calls,Customer_rating,Weight_in_gms";

/// Ten shipments: six from block A, four from block B.
fn ten_rows() -> String {
    let rows = [
        "1,A,Flight,4,2,1233",
        "2,A,Flight,4,5,3088",
        "3,A,Ship,2,2,3374",
        "4,B,Ship,3,3,1177",
        "5,A,Road,2,2,2484",
        "6,B,Flight,3,1,1417",
        "7,A,Ship,3,4,2371",
        "8,B,Road,4,1,2804",
        "9,A,Ship,3,4,1861",
        "10,B,Ship,3,2,1187",
    ];
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}

fn setup(contents: &str) -> (tempfile::TempDir, DashboardConfig) {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("shipping-data.csv");
    std::fs::write(&input, contents).unwrap();
    let config = DashboardConfig::with_paths(input, tmp.path().join("docs"));
    (tmp, config)
}

fn expected_outputs(dir: &Path) -> Vec<PathBuf> {
    [
        "shipping_per_warehouse.png",
        "mode_of_shipment.png",
        "average_customer_rating.png",
        "weight_distribution.png",
        PAGE_FILE,
    ]
    .iter()
    .map(|f| dir.join(f))
    .collect()
}

#[test]
fn ten_row_scenario_writes_every_output() {
    let (_tmp, config) = setup(&ten_rows());

    let dataset = load_file(&config.input_path).unwrap();
    let counts = count_by_warehouse(&dataset);
    assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("A", 6), ("B", 4)]);

    let report = run(&config).unwrap();
    assert_eq!(report.records, 10);
    assert_eq!(report.charts.len(), 4);

    for path in expected_outputs(&config.output_dir) {
        let len = std::fs::metadata(&path).unwrap().len();
        assert!(len > 0, "{} is empty", path.display());
    }

    let html = std::fs::read_to_string(&report.page).unwrap();
    assert!(html.contains("shipping_per_warehouse.png"));
}

#[test]
fn charts_are_valid_png_images() {
    let (_tmp, config) = setup(&ten_rows());
    let report = run(&config).unwrap();

    for chart in &report.charts {
        let img = image::open(chart).unwrap();
        assert_eq!((img.width(), img.height()), (640, 480), "{}", chart.display());
    }
}

#[test]
fn missing_rating_column_fails_before_writing() {
    let csv = "Warehouse_block,Mode_of_Shipment,Weight_in_gms\nA,Ship,1000\nB,Road,2000\n";
    let (_tmp, config) = setup(csv);

    match run(&config) {
        Err(DashboardError::Schema { column, .. }) => assert_eq!(column, "Customer_rating"),
        other => panic!("expected schema error, got {other:?}"),
    }
    assert!(!config.output_dir.exists());
}

#[test]
fn missing_input_is_data_source_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = DashboardConfig::with_paths(tmp.path().join("absent.csv"), tmp.path().join("docs"));
    let err = run(&config).unwrap_err();
    assert!(matches!(err, DashboardError::DataSource { .. }));
    assert!(!config.output_dir.exists());
}

#[test]
fn second_run_is_idempotent() {
    let (_tmp, config) = setup(&ten_rows());

    run(&config).unwrap();
    let first = std::fs::read(config.output_dir.join(PAGE_FILE)).unwrap();

    run(&config).unwrap();
    let second = std::fs::read(config.output_dir.join(PAGE_FILE)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn json_input_runs_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("shipping.json");
    std::fs::write(
        &input,
        r#"[
            {"Warehouse_block": "F", "Mode_of_Shipment": "Ship", "Customer_rating": 3, "Weight_in_gms": 4200},
            {"Warehouse_block": "F", "Mode_of_Shipment": "Road", "Customer_rating": 1, "Weight_in_gms": 1500},
            {"Warehouse_block": "C", "Mode_of_Shipment": "Ship", "Customer_rating": 5, "Weight_in_gms": 5100}
        ]"#,
    )
    .unwrap();

    let mut config = DashboardConfig::with_paths(input, tmp.path().join("out").join("docs"));
    config.bin_count = 5;

    let report = run(&config).unwrap();
    assert_eq!(report.records, 3);
    for path in expected_outputs(&config.output_dir) {
        assert!(path.exists(), "{} missing", path.display());
    }
}

#[test]
fn existing_output_directory_is_reused() {
    let (_tmp, config) = setup(&ten_rows());
    std::fs::create_dir_all(&config.output_dir).unwrap();
    std::fs::write(config.output_dir.join("notes.txt"), "keep me").unwrap();

    run(&config).unwrap();

    assert_eq!(
        std::fs::read_to_string(config.output_dir.join("notes.txt")).unwrap(),
        "keep me"
    );
}
