//! Market-data provider client (Yahoo-style quote summary endpoints).
//!
//! One call covers the company profile and the fixed ratio snapshot; a
//! second covers quarterly revenue / net income. Parsing is deliberately
//! lenient: any field the provider omits stays null.

use async_trait::async_trait;
use chrono::NaiveTime;
use reqwest::Client;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use research_core::{
    CompanyInfo, CompanyOverview, FinancialRatios, MarketDataSource, QuarterFigures,
    ResearchError, Window,
};

const BASE_URL: &str = "https://query1.finance.yahoo.com";

const QUOTE_SUMMARY_MODULES: &str =
    "assetProfile,price,summaryDetail,financialData,defaultKeyStatistics";

const QUARTERLY_TYPES: [&str; 2] = ["quarterlyTotalRevenue", "quarterlyNetIncome"];

/// Provider values arrive as `{"raw": 1.23, "fmt": "1.23"}`; only the raw
/// number matters here.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<f64>,
}

fn raw(value: &Option<RawValue>) -> Option<f64> {
    value.as_ref().and_then(|v| v.raw)
}

#[derive(Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryOuter,
}

#[derive(Deserialize)]
struct QuoteSummaryOuter {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Default, Deserialize)]
struct QuoteSummaryResult {
    #[serde(rename = "assetProfile", default)]
    asset_profile: Option<AssetProfile>,
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(rename = "summaryDetail", default)]
    summary_detail: Option<SummaryDetail>,
    #[serde(rename = "financialData", default)]
    financial_data: Option<FinancialData>,
    #[serde(rename = "defaultKeyStatistics", default)]
    key_statistics: Option<KeyStatistics>,
}

#[derive(Default, Deserialize)]
struct AssetProfile {
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Default, Deserialize)]
struct PriceModule {
    #[serde(rename = "shortName", default)]
    short_name: Option<String>,
    #[serde(rename = "longName", default)]
    long_name: Option<String>,
    #[serde(rename = "exchangeName", default)]
    exchange_name: Option<String>,
}

#[derive(Default, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "trailingPE", default)]
    trailing_pe: Option<RawValue>,
    #[serde(rename = "forwardPE", default)]
    forward_pe: Option<RawValue>,
}

#[derive(Default, Deserialize)]
struct FinancialData {
    #[serde(rename = "returnOnEquity", default)]
    return_on_equity: Option<RawValue>,
    #[serde(rename = "profitMargins", default)]
    profit_margins: Option<RawValue>,
    #[serde(rename = "operatingMargins", default)]
    operating_margins: Option<RawValue>,
    #[serde(rename = "debtToEquity", default)]
    debt_to_equity: Option<RawValue>,
}

#[derive(Default, Deserialize)]
struct KeyStatistics {
    #[serde(rename = "priceToBook", default)]
    price_to_book: Option<RawValue>,
    #[serde(rename = "forwardPE", default)]
    forward_pe: Option<RawValue>,
}

#[derive(Deserialize)]
struct TimeseriesEnvelope {
    timeseries: TimeseriesOuter,
}

#[derive(Deserialize)]
struct TimeseriesOuter {
    #[serde(default)]
    result: Option<Vec<TimeseriesResult>>,
}

/// Each result carries one series under a key named after its type
/// (plus a `timestamp` array we ignore), so the series land in a loose
/// map and get decoded per known type.
#[derive(Deserialize)]
struct TimeseriesResult {
    #[serde(flatten)]
    series: HashMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct TimeseriesPoint {
    #[serde(rename = "asOfDate")]
    as_of_date: String,
    #[serde(rename = "reportedValue", default)]
    reported_value: Option<RawValue>,
}

fn parse_overview(body: &str) -> Result<CompanyOverview, ResearchError> {
    let envelope: QuoteSummaryEnvelope =
        serde_json::from_str(body).map_err(|e| ResearchError::Data(e.to_string()))?;
    let result = envelope
        .quote_summary
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| ResearchError::Data("empty quoteSummary result".to_string()))?;

    let profile = result.asset_profile.unwrap_or_default();
    let price = result.price.unwrap_or_default();
    let summary = result.summary_detail.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();
    let stats = result.key_statistics.unwrap_or_default();

    Ok(CompanyOverview {
        info: CompanyInfo {
            short_name: price.short_name,
            long_name: price.long_name,
            sector: profile.sector,
            industry: profile.industry,
            exchange: price.exchange_name,
            country: profile.country,
        },
        ratios: FinancialRatios {
            trailing_pe: raw(&summary.trailing_pe),
            forward_pe: raw(&summary.forward_pe).or(raw(&stats.forward_pe)),
            price_to_book: raw(&stats.price_to_book),
            return_on_equity: raw(&financial.return_on_equity),
            profit_margins: raw(&financial.profit_margins),
            debt_to_equity: raw(&financial.debt_to_equity),
            operating_margins: raw(&financial.operating_margins),
        },
    })
}

fn parse_quarters(body: &str) -> Result<BTreeMap<String, QuarterFigures>, ResearchError> {
    let envelope: TimeseriesEnvelope =
        serde_json::from_str(body).map_err(|e| ResearchError::Data(e.to_string()))?;

    let mut quarters: BTreeMap<String, QuarterFigures> = BTreeMap::new();
    for result in envelope.timeseries.result.unwrap_or_default() {
        for series_type in QUARTERLY_TYPES {
            let Some(value) = result.series.get(series_type) else {
                continue;
            };
            let Ok(points) =
                serde_json::from_value::<Vec<Option<TimeseriesPoint>>>(value.clone())
            else {
                continue;
            };
            for point in points.into_iter().flatten() {
                let figure = raw(&point.reported_value);
                let entry = quarters.entry(point.as_of_date).or_default();
                match series_type {
                    "quarterlyTotalRevenue" => entry.revenue = figure,
                    _ => entry.net_income = figure,
                }
            }
        }
    }

    Ok(quarters)
}

#[derive(Clone)]
pub struct MarketDataClient {
    client: Client,
}

impl MarketDataClient {
    pub fn new() -> Self {
        Self {
            client: crate::http_client(),
        }
    }

    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, ResearchError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ResearchError::Source(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResearchError::Source(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ResearchError::Source(e.to_string()))
    }
}

impl Default for MarketDataClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for MarketDataClient {
    fn profile_url(&self, ticker: &str) -> String {
        format!("https://finance.yahoo.com/quote/{ticker}")
    }

    async fn overview(&self, ticker: &str) -> Result<CompanyOverview, ResearchError> {
        let url = format!("{BASE_URL}/v10/finance/quoteSummary/{ticker}");
        let body = self
            .get_text(&url, &[("modules", QUOTE_SUMMARY_MODULES.to_string())])
            .await?;
        parse_overview(&body)
    }

    async fn quarterly_figures(
        &self,
        ticker: &str,
        window: &Window,
    ) -> Result<BTreeMap<String, QuarterFigures>, ResearchError> {
        let url = format!("{BASE_URL}/ws/fundamentals-timeseries/v1/finance/timeseries/{ticker}");
        let period1 = window.from.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = window.to.and_time(NaiveTime::MIN).and_utc().timestamp();
        let body = self
            .get_text(
                &url,
                &[
                    ("type", QUARTERLY_TYPES.join(",")),
                    ("period1", period1.to_string()),
                    ("period2", period2.to_string()),
                    ("merge", "false".to_string()),
                ],
            )
            .await?;
        parse_quarters(&body)
    }
}
