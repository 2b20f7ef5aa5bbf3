// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成6个销售测试数据集CSV文件
// 输出: tests/fixtures/datasets/*.csv
// 说明: 全部确定性生成，重复运行结果一致
// ==========================================

use chrono::{Duration, NaiveDate};
use csv::Writer;
use std::error::Error;
use std::fs::File;

// CSV 表头（与原始销售表列名一致）
const CSV_HEADER: &[&str] = &[
    "Invoice ID",
    "Branch",
    "City",
    "Customer type",
    "Gender",
    "Product line",
    "Unit price",
    "Quantity",
    "Tax 5%",
    "Total",
    "Date",
    "Time",
    "Payment",
    "cogs",
    "gross margin percentage",
    "gross income",
    "Rating",
];

const OUTPUT_DIR: &str = "tests/fixtures/datasets";

const BRANCHES: [(&str, &str); 3] = [("A", "Yangon"), ("B", "Mandalay"), ("C", "Naypyitaw")];
const CUSTOMER_TYPES: [&str; 2] = ["Member", "Normal"];
const GENDERS: [&str; 2] = ["Female", "Male"];
const PRODUCT_LINES: [&str; 6] = [
    "Health and beauty",
    "Electronic accessories",
    "Home and lifestyle",
    "Sports and travel",
    "Food and beverages",
    "Fashion accessories",
];
const PAYMENTS: [&str; 3] = ["Ewallet", "Cash", "Credit card"];

// 销售记录结构
#[derive(Clone)]
struct SaleRow {
    invoice_id: String,
    branch: String,
    city: String,
    customer_type: String,
    gender: String,
    product_line: String,
    unit_price: String,
    quantity: String,
    tax: String,
    total: String,
    date: String,
    time: String,
    payment: String,
    cogs: String,
    gross_margin_pct: String,
    gross_income: String,
    rating: String,
}

impl SaleRow {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.invoice_id.clone(),
            self.branch.clone(),
            self.city.clone(),
            self.customer_type.clone(),
            self.gender.clone(),
            self.product_line.clone(),
            self.unit_price.clone(),
            self.quantity.clone(),
            self.tax.clone(),
            self.total.clone(),
            self.date.clone(),
            self.time.clone(),
            self.payment.clone(),
            self.cogs.clone(),
            self.gross_margin_pct.clone(),
            self.gross_income.clone(),
            self.rating.clone(),
        ]
    }
}

// 生成正常记录（源表格式: 日期 M/D/YYYY，时间 HH:MM）
fn generate_normal_record(index: usize) -> SaleRow {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default();
    let (branch, city) = BRANCHES[index % BRANCHES.len()];
    let unit_price = 10.0 + ((index * 37) % 90) as f64 + 0.29;
    let quantity = 1 + (index * 7) % 10;
    let cogs = unit_price * quantity as f64;
    let tax = cogs * 0.05;
    let date = start + Duration::days((index % 89) as i64);
    let minutes = 10 * 60 + (index * 23) % (11 * 60);

    SaleRow {
        invoice_id: format!(
            "{:03}-{:02}-{:04}",
            100 + index % 900,
            10 + index % 90,
            index
        ),
        branch: branch.to_string(),
        city: city.to_string(),
        customer_type: CUSTOMER_TYPES[index % 2].to_string(),
        gender: GENDERS[(index / 2) % 2].to_string(),
        product_line: PRODUCT_LINES[(index * 5) % PRODUCT_LINES.len()].to_string(),
        unit_price: format!("{:.2}", unit_price),
        quantity: quantity.to_string(),
        tax: format!("{:.4}", tax),
        total: format!("{:.4}", cogs + tax),
        date: date.format("%-m/%-d/%Y").to_string(),
        time: format!("{:02}:{:02}", minutes / 60, minutes % 60),
        payment: PAYMENTS[(index / 3) % PAYMENTS.len()].to_string(),
        cogs: format!("{:.2}", cogs),
        gross_margin_pct: "4.761904762".to_string(),
        gross_income: format!("{:.4}", tax),
        rating: format!("{:.1}", 4.0 + ((index * 13) % 61) as f64 / 10.0),
    }
}

fn create_writer(name: &str) -> Result<Writer<File>, Box<dyn Error>> {
    let file = File::create(format!("{}/{}", OUTPUT_DIR, name))?;
    let mut wtr = Writer::from_writer(file);
    wtr.write_record(CSV_HEADER)?;
    Ok(wtr)
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成测试数据集...");

    std::fs::create_dir_all(OUTPUT_DIR)?;

    generate_normal_data()?;
    generate_large_dataset()?;
    generate_duplicate_invoices()?;
    generate_missing_required_fields()?;
    generate_invalid_values()?;
    generate_unparseable_datetime()?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}

// 数据集1: 正常数据（100条）
fn generate_normal_data() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("01_normal_data.csv")?;
    for i in 0..100 {
        wtr.write_record(generate_normal_record(i).to_row())?;
    }
    wtr.flush()?;
    println!("✓ 生成 01_normal_data.csv (100条)");
    Ok(())
}

// 数据集2: 大数据量（1000条，与原始数据集规模一致）
fn generate_large_dataset() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("02_large_dataset.csv")?;
    for i in 0..1000 {
        wtr.write_record(generate_normal_record(i).to_row())?;
    }
    wtr.flush()?;
    println!("✓ 生成 02_large_dataset.csv (1000条)");
    Ok(())
}

// 数据集3: 重复发票号（20条，后5条重复前5条的发票号）
fn generate_duplicate_invoices() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("03_duplicate_invoices.csv")?;
    for i in 0..15 {
        wtr.write_record(generate_normal_record(i).to_row())?;
    }
    for i in 0..5 {
        let mut record = generate_normal_record(100 + i);
        record.invoice_id = generate_normal_record(i).invoice_id;
        wtr.write_record(record.to_row())?;
    }
    wtr.flush()?;
    println!("✓ 生成 03_duplicate_invoices.csv (20条，包含5组重复)");
    Ok(())
}

// 数据集4: 缺失必填字段（15条，其中5条缺失）
fn generate_missing_required_fields() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("04_missing_required_fields.csv")?;
    for i in 0..15 {
        let mut record = generate_normal_record(i);
        match i {
            2 => record.invoice_id = String::new(),
            4 => record.branch = String::new(),
            6 => record.unit_price = "N/A".to_string(),
            8 => record.quantity = String::new(),
            10 => record.payment = "null".to_string(),
            _ => {}
        }
        wtr.write_record(record.to_row())?;
    }
    wtr.flush()?;
    println!("✓ 生成 04_missing_required_fields.csv (15条，5条缺失必填字段)");
    Ok(())
}

// 数据集5: 非法取值（12条: 非数值 / 越界 / 未知枚举）
fn generate_invalid_values() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("05_invalid_values.csv")?;
    for i in 0..12 {
        let mut record = generate_normal_record(i);
        match i {
            1 => record.unit_price = "abc".to_string(),
            3 => record.quantity = "-2".to_string(),
            5 => record.rating = "11.5".to_string(),
            7 => record.product_line = "Garden".to_string(),
            9 => record.unit_price = "0".to_string(),
            _ => {}
        }
        wtr.write_record(record.to_row())?;
    }
    wtr.flush()?;
    println!("✓ 生成 05_invalid_values.csv (12条，5条非法取值)");
    Ok(())
}

// 数据集6: 日期/时间无法解析（10条，其中3条）
fn generate_unparseable_datetime() -> Result<(), Box<dyn Error>> {
    let mut wtr = create_writer("06_unparseable_datetime.csv")?;
    for i in 0..10 {
        let mut record = generate_normal_record(i);
        match i {
            0 => record.date = "13/45/2019".to_string(),
            4 => record.time = "late".to_string(),
            8 => {
                record.date = "yesterday".to_string();
                record.time = "25:99".to_string();
            }
            _ => {}
        }
        wtr.write_record(record.to_row())?;
    }
    wtr.flush()?;
    println!("✓ 生成 06_unparseable_datetime.csv (10条，3条日期/时间无法解析)");
    Ok(())
}
