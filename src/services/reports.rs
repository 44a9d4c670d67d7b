//! Report document rendering
//!
//! Turns estimate output into self-contained printable HTML documents served
//! with a content disposition. Downstream printing/PDF conversion is the
//! caller's concern; this service only owns the document structure.

use std::fmt::Write;

use chrono::Utc;

use crate::{
    api::estimates::{FeedEstimate, PerDayEstimate, SupplyOrderRequest, YearlyEstimate},
    error::{AppError, AppResult},
    models::enums::fasting_day_name,
};

const DOCUMENT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A rendered report ready to be served
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub filename: String,
    pub content_type: &'static str,
    /// Inline documents open in the browser; attachments download
    pub inline: bool,
    pub bytes: Vec<u8>,
}

/// Validated supply order header fields
#[derive(Debug, Clone)]
pub struct SupplyOrder {
    pub file_number: String,
    pub memo_number: String,
    pub date: String,
    pub supplier_name: String,
    pub supplier_address: String,
    pub month: i32,
    pub year: i32,
    pub terms_conditions: String,
    pub fasting_day: i32,
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_error(e: std::fmt::Error) -> AppError {
    AppError::Report(format!("document assembly failed: {}", e))
}

/// Wrap a document body with the shared print styling
fn document(title: &str, landscape: bool, body: &str) -> String {
    let size = if landscape { "A3 landscape" } else { "A4 portrait" };
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n@page {{ size: {size}; margin: 1.5cm; }}\n\
         body {{ font-family: 'DejaVu Sans', sans-serif; font-size: 11px; }}\n\
         h1 {{ font-size: 16px; }}\nh2 {{ font-size: 13px; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #444; padding: 3px 6px; text-align: right; }}\n\
         th, td.label {{ text-align: left; }}\n\
         tfoot td {{ font-weight: bold; }}\n</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
        size = size,
        body = body,
    )
}

fn estimate_lines_table(estimate: &FeedEstimate, with_prices: bool) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    out.push_str("<table>\n<thead><tr><th>#</th><th>Feed item</th><th>Unit</th><th>Qty/day</th><th>Total qty</th>");
    if with_prices {
        out.push_str("<th>Rate</th><th>Amount</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for (index, line) in estimate.estimates.iter().enumerate() {
        write!(
            out,
            "<tr><td>{}</td><td class=\"label\">{}</td><td class=\"label\">{}</td><td>{:.2}</td><td>{:.2}</td>",
            index + 1,
            escape(&line.name),
            escape(&line.unit),
            line.quantity_per_day,
            line.total_quantity,
        )?;
        if with_prices {
            write!(out, "<td>{}</td><td>{:.2}</td>", line.price_per_unit, line.total_price)?;
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n");
    if with_prices {
        write!(
            out,
            "<tfoot><tr><td colspan=\"6\" class=\"label\">Total ({})</td><td>{:.2}</td></tr></tfoot>\n",
            escape(&estimate.currency),
            estimate.total_price,
        )?;
    }
    out.push_str("</table>\n");
    Ok(out)
}

#[derive(Clone, Default)]
pub struct ReportsService;

impl ReportsService {
    pub fn new() -> Self {
        Self
    }

    /// Check the supply order payload, naming the first missing parameter
    pub fn validated_supply_order(&self, data: &SupplyOrderRequest) -> AppResult<SupplyOrder> {
        fn text(value: &Option<String>, name: &str) -> AppResult<String> {
            value
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    AppError::BadRequest(format!("Missing required parameter: {}", name))
                })
        }
        fn number(value: Option<i32>, name: &str) -> AppResult<i32> {
            value.ok_or_else(|| {
                AppError::BadRequest(format!("Missing required parameter: {}", name))
            })
        }

        Ok(SupplyOrder {
            file_number: text(&data.file_number, "file_number")?,
            memo_number: text(&data.memo_number, "memo_number")?,
            date: text(&data.date, "date")?,
            supplier_name: text(&data.supplier_name, "supplier_name")?,
            supplier_address: text(&data.supplier_address, "supplier_address")?,
            month: number(data.month, "month")?,
            year: number(data.year, "year")?,
            terms_conditions: text(&data.terms_conditions, "terms_conditions")?,
            fasting_day: number(data.fasting_day, "fasting_day")?,
        })
    }

    /// Supply order document (attachment)
    pub fn supply_order(
        &self,
        order: &SupplyOrder,
        estimate: &FeedEstimate,
    ) -> AppResult<RenderedReport> {
        let mut body = String::new();
        (|| -> Result<(), std::fmt::Error> {
            write!(
                body,
                "<h1>Supply Order</h1>\n\
                 <p>File No: {} &mdash; Memo No: {} &mdash; Date: {}</p>\n\
                 <p>Supplier: {}<br>{}</p>\n\
                 <h2>Feed requirement for {} {} ({} feeding days)</h2>\n",
                escape(&order.file_number),
                escape(&order.memo_number),
                escape(&order.date),
                escape(&order.supplier_name),
                escape(&order.supplier_address),
                crate::models::enums::month_name(order.month),
                order.year,
                estimate.feeding_days,
            )?;
            body.push_str(&estimate_lines_table(estimate, false)?);
            write!(
                body,
                "<h2>Terms &amp; Conditions</h2>\n<p>{}</p>\n",
                escape(&order.terms_conditions)
            )?;
            Ok(())
        })()
        .map_err(render_error)?;

        Ok(RenderedReport {
            filename: "supply_order.html".to_string(),
            content_type: DOCUMENT_CONTENT_TYPE,
            inline: false,
            bytes: document("Supply Order", false, &body).into_bytes(),
        })
    }

    /// Pricing estimate document (attachment)
    pub fn pricing_estimate(
        &self,
        fasting_day: i32,
        estimate: &FeedEstimate,
    ) -> AppResult<RenderedReport> {
        let mut body = String::new();
        (|| -> Result<(), std::fmt::Error> {
            write!(
                body,
                "<h1>Pricing Estimate</h1>\n\
                 <p>Generated: {}</p>\n\
                 <p>Period: {} {} &mdash; {} total days, {} feeding days, {} fasting days \
                 (fasting day: {})</p>\n",
                Utc::now().format("%d/%m/%Y"),
                crate::models::enums::month_name(estimate.month),
                estimate.year,
                estimate.total_days,
                estimate.feeding_days,
                estimate.fasting_days,
                fasting_day_name(fasting_day),
            )?;
            body.push_str(&estimate_lines_table(estimate, true)?);
            Ok(())
        })()
        .map_err(render_error)?;

        Ok(RenderedReport {
            filename: "pricing_estimate.html".to_string(),
            content_type: DOCUMENT_CONTENT_TYPE,
            inline: false,
            bytes: document("Pricing Estimate", false, &body).into_bytes(),
        })
    }

    /// Per-day category cross-tab document (inline)
    pub fn per_day_table(&self, estimate: &PerDayEstimate) -> AppResult<RenderedReport> {
        let mut body = String::new();
        (|| -> Result<(), std::fmt::Error> {
            write!(
                body,
                "<h1>Per-day feed estimate &mdash; {}</h1>\n\
                 <p>{} {} &mdash; {} feeding days (fasting day: {})</p>\n\
                 <table>\n<thead><tr><th>Feed item</th><th>Unit</th>",
                escape(&estimate.category.name),
                estimate.days_info.month_name,
                estimate.year,
                estimate.days_info.feeding_days,
                escape(&estimate.days_info.fasting_day_name),
            )?;
            for animal in &estimate.animals {
                write!(body, "<th>{} ({})</th>", escape(&animal.name), animal.quantity)?;
            }
            body.push_str("<th>Daily total</th></tr></thead>\n<tbody>\n");

            for row in &estimate.feed_items {
                write!(
                    body,
                    "<tr><td class=\"label\">{}</td><td class=\"label\">{}</td>",
                    escape(&row.name),
                    escape(&row.unit)
                )?;
                for animal in &estimate.animals {
                    let required = row
                        .diets
                        .get(&animal.id)
                        .map(|cell| cell.required_for_quantity)
                        .unwrap_or(0.0);
                    write!(body, "<td>{:.2}</td>", required)?;
                }
                write!(body, "<td>{:.2}</td></tr>\n", row.daily_total)?;
            }

            body.push_str("</tbody>\n<tfoot><tr><td colspan=\"2\" class=\"label\">Column totals</td>");
            for animal in &estimate.animals {
                let total = estimate.column_totals.get(&animal.id).copied().unwrap_or(0.0);
                write!(body, "<td>{:.2}</td>", total)?;
            }
            write!(body, "<td>{:.2}</td></tr></tfoot>\n</table>\n", estimate.grand_total)?;
            Ok(())
        })()
        .map_err(render_error)?;

        Ok(RenderedReport {
            filename: format!(
                "feed-estimate-{}-{:02}-{}.html",
                estimate.category.id, estimate.month, estimate.year
            ),
            content_type: DOCUMENT_CONTENT_TYPE,
            inline: true,
            bytes: document("Per-day Feed Estimate", true, &body).into_bytes(),
        })
    }

    /// Yearly category table document (inline)
    pub fn yearly_table(&self, estimate: &YearlyEstimate) -> AppResult<RenderedReport> {
        let mut body = String::new();
        (|| -> Result<(), std::fmt::Error> {
            write!(
                body,
                "<h1>Yearly feed estimate &mdash; {} ({})</h1>\n\
                 <p>Fasting day: {} &mdash; {} effective feeding days in the year</p>\n\
                 <table>\n<thead><tr><th>Feed item</th><th>Unit</th><th>Qty/day</th>",
                escape(&estimate.category.name),
                estimate.year,
                escape(&estimate.fasting_day_name),
                estimate.total_effective_days_in_year,
            )?;
            for info in &estimate.months_info {
                write!(body, "<th>{} ({})</th>", info.month_name, info.effective_days)?;
            }
            body.push_str("<th>Year total</th><th>Rate</th><th>Annual cost</th></tr></thead>\n<tbody>\n");

            for row in &estimate.feed_items_table {
                write!(
                    body,
                    "<tr><td class=\"label\">{}</td><td class=\"label\">{}</td><td>{:.2}</td>",
                    escape(&row.name),
                    escape(&row.unit),
                    row.quantity_per_day,
                )?;
                for total in &row.monthly_totals {
                    write!(body, "<td>{:.2}</td>", total)?;
                }
                write!(
                    body,
                    "<td>{:.2}</td><td>{}</td><td>{:.2}</td></tr>\n",
                    row.year_total, row.rate_per_kg, row.annual_cost
                )?;
            }

            body.push_str("</tbody>\n<tfoot><tr><td colspan=\"3\" class=\"label\">Monthly grand totals</td>");
            for total in &estimate.monthly_grand_totals.months {
                write!(body, "<td>{:.2}</td>", total)?;
            }
            write!(
                body,
                "<td>{:.2}</td><td></td><td>{:.2}</td></tr></tfoot>\n</table>\n",
                estimate.monthly_grand_totals.year_total, estimate.total_annual_cost
            )?;
            Ok(())
        })()
        .map_err(render_error)?;

        Ok(RenderedReport {
            filename: format!(
                "feed-estimate-yearly-{}-{}.html",
                estimate.category.id, estimate.year
            ),
            content_type: DOCUMENT_CONTENT_TYPE,
            inline: true,
            bytes: document("Yearly Feed Estimate", true, &body).into_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::estimates::FeedEstimateLine;

    fn sample_estimate() -> FeedEstimate {
        FeedEstimate {
            month: 3,
            year: 2025,
            total_days: 31,
            feeding_days: 26,
            fasting_days: 5,
            estimates: vec![FeedEstimateLine {
                id: 1,
                name: "Meat <fresh>".to_string(),
                unit: "kg".to_string(),
                quantity_per_day: 26.0,
                total_quantity: 676.0,
                price_per_unit: 300,
                total_price: 202800.0,
            }],
            total_price: 202800.0,
            currency: "INR".to_string(),
        }
    }

    fn order_request() -> SupplyOrderRequest {
        SupplyOrderRequest {
            file_number: Some("F-12".to_string()),
            memo_number: Some("M-7".to_string()),
            date: Some("2025-03-01".to_string()),
            supplier_name: Some("Acme Feeds".to_string()),
            supplier_address: Some("12 Market Road".to_string()),
            month: Some(3),
            year: Some(2025),
            terms_conditions: Some("Net 30".to_string()),
            fasting_day: Some(1),
        }
    }

    #[test]
    fn test_supply_order_validation_names_missing_parameter() {
        let service = ReportsService::new();
        let mut request = order_request();
        request.supplier_name = None;

        let err = service.validated_supply_order(&request).unwrap_err();
        assert!(err
            .to_string()
            .contains("Missing required parameter: supplier_name"));

        // empty strings count as missing too
        let mut request = order_request();
        request.file_number = Some(String::new());
        let err = service.validated_supply_order(&request).unwrap_err();
        assert!(err
            .to_string()
            .contains("Missing required parameter: file_number"));
    }

    #[test]
    fn test_supply_order_document_contains_order_fields() {
        let service = ReportsService::new();
        let order = service.validated_supply_order(&order_request()).unwrap();
        let report = service.supply_order(&order, &sample_estimate()).unwrap();

        assert!(!report.inline);
        assert_eq!(report.filename, "supply_order.html");
        let html = String::from_utf8(report.bytes).unwrap();
        assert!(html.contains("Acme Feeds"));
        assert!(html.contains("Net 30"));
        // markup in user data is escaped
        assert!(html.contains("Meat &lt;fresh&gt;"));
        assert!(!html.contains("Meat <fresh>"));
    }

    #[test]
    fn test_pricing_estimate_document() {
        let service = ReportsService::new();
        let report = service.pricing_estimate(1, &sample_estimate()).unwrap();

        assert!(!report.inline);
        let html = String::from_utf8(report.bytes).unwrap();
        assert!(html.contains("Monday"));
        assert!(html.contains("202800.00"));
        assert!(html.contains("Total (INR)"));
    }
}
