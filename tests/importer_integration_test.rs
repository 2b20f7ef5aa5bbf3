// ==========================================
// SalesImporter 集成测试
// ==========================================
// 测试目标: 验证完整的导入流程（解析 → 映射 → 清洗 → DQ → 快照派生）
// ==========================================


use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;
use supermarket_sales::app::{SalesSnapshot, SnapshotOptions, SnapshotSource};
use supermarket_sales::domain::Field;
use supermarket_sales::engine::{aggregate, extreme, Direction, EngineError, RankBy, Reduction};
use supermarket_sales::importer::{
    CsvParser, DataCleanerImpl, DataSourceError, DqValidatorImpl, FieldMapperImpl,
    SalesImporter, SalesImporterImpl,
};
use supermarket_sales::logging;
use test_helpers::{csv_row, write_temp_csv, CSV_HEADER};

/// 创建测试用的 SalesImporter 实例（仅 CSV）
fn create_test_importer() -> SalesImporterImpl {
    SalesImporterImpl::new(
        Box::new(CsvParser),
        Box::new(FieldMapperImpl),
        Box::new(DataCleanerImpl),
        Box::new(DqValidatorImpl::new((0.0, 10.0))),
    )
}

/// 工作簿中一行的日期 / 时间单元格
enum XlsxWhen {
    /// Excel 日期 + 时间单元格
    Cells((u16, u8, u8), (u16, u8)),
    /// 未设置日期格式的裸数字
    Numbers(f64, f64),
}

/// 写入临时 Excel 工作簿（日期 / 时间列为真实单元格）
fn write_temp_xlsx(rows: &[(&str, &str, &str, f64, XlsxWhen)]) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("创建临时文件失败");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("m/d/yyyy");
    let time_format = Format::new().set_num_format("hh:mm");

    for (col, header) in CSV_HEADER.split(',').enumerate() {
        sheet.write_string(0, col as u16, header).expect("写入表头失败");
    }

    for (idx, (invoice_id, branch, city, total, when)) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, *invoice_id).unwrap();
        sheet.write_string(row, 1, *branch).unwrap();
        sheet.write_string(row, 2, *city).unwrap();
        sheet.write_string(row, 3, "Member").unwrap();
        sheet.write_string(row, 4, "Female").unwrap();
        sheet.write_string(row, 5, "Health and beauty").unwrap();
        sheet.write_number(row, 6, 74.69).unwrap();
        sheet.write_number(row, 7, 7).unwrap();
        sheet.write_number(row, 8, 26.1415).unwrap();
        sheet.write_number(row, 9, *total).unwrap();
        match when {
            XlsxWhen::Cells((y, m, d), (hh, mm)) => {
                let date = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
                let time = ExcelDateTime::from_hms(*hh, *mm, 0).unwrap();
                sheet.write_datetime_with_format(row, 10, &date, &date_format).unwrap();
                sheet.write_datetime_with_format(row, 11, &time, &time_format).unwrap();
            }
            XlsxWhen::Numbers(date, time) => {
                sheet.write_number(row, 10, *date).unwrap();
                sheet.write_number(row, 11, *time).unwrap();
            }
        }
        sheet.write_string(row, 12, "Ewallet").unwrap();
        sheet.write_number(row, 13, 522.83).unwrap();
        sheet.write_number(row, 14, 4.761904762).unwrap();
        sheet.write_number(row, 15, 26.1415).unwrap();
        sheet.write_number(row, 16, 9.1).unwrap();
    }

    workbook.save(file.path()).expect("保存工作簿失败");
    file
}

fn options() -> SnapshotOptions {
    SnapshotOptions {
        locale: "en".to_string(),
        rating_range: (0.0, 10.0),
        placeholder_rows: 20,
    }
}

#[test]
fn test_import_csv_basic() {
    // 初始化日志系统
    logging::init_test();

    let file = write_temp_csv(&[
        csv_row("750-67-8428", "A", "Yangon", 548.9715, "1/5/2019", "13:08"),
        csv_row("226-31-3081", "C", "Naypyitaw", 80.22, "3/8/2019", "10:29"),
        csv_row("631-41-3108", "A", "Yangon", 340.5255, "3/3/2019", "13:23"),
    ])
    .expect("写入临时文件失败");

    let outcome = create_test_importer()
        .import_file(file.path())
        .expect("导入应成功");

    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.dq_report.summary.total_rows, 3);
    assert_eq!(outcome.dq_report.summary.success, 3);
    assert_eq!(outcome.dq_report.summary.blocked, 0);

    // 行号从 2 开始（第 1 行为表头）
    let rows: Vec<usize> = outcome.records.iter().map(|r| r.row_number).collect();
    assert_eq!(rows, vec![2, 3, 4]);
}

#[test]
fn test_import_cleans_text_and_nulls() {
    logging::init_test();

    let file = write_temp_csv(&[
        "  X1 , a ,  Yangon ,Member,Female,Health and beauty,10,1,N/A,10.5,1/5/2019,13:08,Ewallet,10,4.76,0.5,nan"
            .to_string(),
    ])
    .expect("写入临时文件失败");

    let outcome = create_test_importer()
        .import_file(file.path())
        .expect("导入应成功");

    let record = &outcome.records[0];
    assert_eq!(record.invoice_id, "X1");
    assert_eq!(record.branch, "A");
    assert_eq!(record.city, "Yangon");
    assert_eq!(record.tax, None);
    assert_eq!(record.rating, None);
    // 缺失 tax / rating 为警告，不阻断
    assert!(outcome.dq_report.summary.warning >= 2);
}

#[test]
fn test_import_file_not_found() {
    let result = create_test_importer().import_file(Path::new("missing/supermarket_sales.csv"));
    assert!(matches!(result, Err(DataSourceError::FileNotFound(_))));
}

#[test]
fn test_import_unsupported_format() {
    let file = tempfile::Builder::new()
        .suffix(".parquet")
        .tempfile()
        .expect("创建临时文件失败");
    let result = SalesImporterImpl::with_defaults((0.0, 10.0)).import_file(file.path());
    assert!(matches!(result, Err(DataSourceError::UnsupportedFormat(_))));
}

#[test]
fn test_snapshot_absorbs_unparseable_time() {
    logging::init_test();

    let file = write_temp_csv(&[
        csv_row("X1", "A", "Yangon", 100.0, "1/5/2019", "13:08"),
        csv_row("X2", "B", "Mandalay", 200.0, "3/8/2019", "late"),
        csv_row("X3", "C", "Naypyitaw", 300.0, "yesterday", "10:29"),
    ])
    .expect("写入临时文件失败");

    let snapshot = SalesSnapshot::load(file.path(), &options());

    assert!(!snapshot.is_degraded());
    assert_eq!(snapshot.len(), 3);
    assert!(matches!(snapshot.source(), SnapshotSource::File { .. }));

    // 单条记录失败不影响其他记录
    let failures = snapshot.derivation_failures();
    assert_eq!(failures.len(), 2);
    assert!(failures
        .iter()
        .all(|e| matches!(e, EngineError::Parse { .. })));

    let records = snapshot.records();
    assert_eq!(records[0].derived.hour, Some(13));
    assert_eq!(records[0].derived.day_of_week.as_deref(), Some("Saturday"));
    assert_eq!(records[1].derived.hour, None);
    assert_eq!(records[1].derived.month_name.as_deref(), Some("March"));
    assert_eq!(records[2].derived.month_name, None);
    assert_eq!(records[2].derived.hour, Some(10));
}

#[test]
fn test_import_then_aggregate() {
    logging::init_test();

    let file = write_temp_csv(&[
        csv_row("X1", "A", "Yangon", 10.0, "1/5/2019", "13:08"),
        csv_row("X2", "A", "Yangon", 20.0, "1/6/2019", "14:08"),
        csv_row("X3", "B", "Mandalay", 30.0, "1/7/2019", "15:08"),
        // 重复发票号，应被阻断
        csv_row("X3", "B", "Mandalay", 999.0, "1/7/2019", "15:08"),
    ])
    .expect("写入临时文件失败");

    let snapshot = SalesSnapshot::load(file.path(), &options());
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.dq_report().summary.conflict, 1);

    let result = aggregate(snapshot.records(), &[Field::City], Field::Total, Reduction::Mean)
        .expect("聚合应成功");
    let winner = extreme(&result, RankBy::Value, Direction::Desc).expect("结果非空");
    assert_eq!(winner.key.to_string(), "Mandalay");
    assert_eq!(winner.value, 30.0);
}

#[test]
fn test_snapshot_degrades_when_no_usable_rows() {
    let file = write_temp_csv(&[
        "X1,A,Yangon,Member,Female,Health and beauty,-1,1,0.5,10.5,1/5/2019,13:08,Ewallet,10,4.76,0.5,5"
            .to_string(),
    ])
    .expect("写入临时文件失败");

    let snapshot = SalesSnapshot::load(file.path(), &options());
    assert!(snapshot.is_degraded());
    assert_eq!(snapshot.len(), 20);
}

#[test]
fn test_import_xlsx_with_date_and_time_cells() {
    logging::init_test();

    let file = write_temp_xlsx(&[
        ("750-67-8428", "A", "Yangon", 548.9715, XlsxWhen::Cells((2019, 1, 5), (13, 8))),
        ("226-31-3081", "C", "Naypyitaw", 80.22, XlsxWhen::Cells((2019, 3, 8), (10, 29))),
        // 裸数字: 不是日期 / 时间
        ("631-41-3108", "A", "Yangon", 340.5255, XlsxWhen::Numbers(2019.0, 13.0)),
    ]);

    let snapshot = SalesSnapshot::load(file.path(), &options());

    assert!(!snapshot.is_degraded());
    assert_eq!(snapshot.len(), 3);

    let records = snapshot.records();
    assert_eq!(records[0].invoice_id, "750-67-8428");
    assert_eq!(records[0].derived.date, NaiveDate::from_ymd_opt(2019, 1, 5));
    assert_eq!(records[0].derived.day_of_week.as_deref(), Some("Saturday"));
    assert_eq!(records[0].derived.month_name.as_deref(), Some("January"));
    assert_eq!(records[0].derived.hour, Some(13));

    assert_eq!(records[1].derived.date, NaiveDate::from_ymd_opt(2019, 3, 8));
    assert_eq!(records[1].derived.day_of_week.as_deref(), Some("Friday"));
    assert_eq!(records[1].derived.hour, Some(10));

    // 裸数字记为派生失败，记录保留
    assert_eq!(records[2].derived.date, None);
    assert_eq!(records[2].derived.hour, None);
    assert_eq!(snapshot.derivation_failures().len(), 2);
}
