mod common;

use common::MockSource;
use market_data_gateway::{
    errors::Error,
    handlers::{
        crypto::{self, CryptoQuoteParams, CryptoSeriesParams},
        economics::{self, CommoditiesParams},
        forex::{self, FxRateParams},
        fundamentals::{self, ListingStatusParams, MarketCalendarParams},
        market::{self, StockSeriesParams},
    },
    models::{operation::Operation, payload::RawPayload},
};
use serde_json::{Map, json};

#[tokio::test]
async fn listing_status_decodes_csv_rows() {
    let source = MockSource::new().with(
        Operation::ListingStatus,
        "symbol,name,exchange,asset_type,ipo_date,delisting_date,status\nAAPL,Apple Inc,NASDAQ,Stock,1980-12-12,,Active\n",
    );
    let params = ListingStatusParams {
        date: None,
        state: "active".to_string(),
    };

    let answer = fundamentals::get_listing_status(&source, params).await.unwrap();

    assert_eq!(
        answer,
        json!({
            "state": "active",
            "listings": [{
                "symbol": "AAPL",
                "name": "Apple Inc",
                "exchange": "NASDAQ",
                "asset_type": "Stock",
                "ipo_date": "1980-12-12",
                "delisting_date": "",
                "status": "Active"
            }]
        })
    );
    let query = source.query_for(Operation::ListingStatus);
    assert_eq!(query.get("state"), Some("active"));
    assert_eq!(query.get("date"), None);
}

#[tokio::test]
async fn fx_rate_is_renamed() {
    let source = MockSource::new().with(
        Operation::CurrencyExchangeRate,
        json!({"Realtime Currency Exchange Rate": {
            "1. From_Currency Code": "USD",
            "2. From_Currency Name": "United States Dollar",
            "3. To_Currency Code": "EUR",
            "4. To_Currency Name": "Euro",
            "5. Exchange Rate": "0.92",
            "6. Last Refreshed": "2024-05-01 10:00:01",
            "7. Time Zone": "UTC",
            "8. Bid Price": "0.9199",
            "9. Ask Price": "0.9201"
        }}),
    );
    let params = FxRateParams {
        from_currency: "USD".to_string(),
        to_currency: "EUR".to_string(),
    };

    let answer = forex::get_current_fx_rate(&source, params).await.unwrap();

    assert_eq!(answer["from_currency_code"], "USD");
    assert_eq!(answer["exchange_rate"], "0.92");
    assert_eq!(answer["bid_price"], "0.9199");
    assert_eq!(answer["ask_price"], "0.9201");
    assert_eq!(answer.as_object().unwrap().len(), 9);
}

#[tokio::test]
async fn fx_rate_without_block_passes_through() {
    let note = json!({"Information": "rate limit reached"});
    let source = MockSource::new().with(Operation::CurrencyExchangeRate, note.clone());
    let params = FxRateParams {
        from_currency: "USD".to_string(),
        to_currency: "JPY".to_string(),
    };

    let answer = forex::get_current_fx_rate(&source, params).await.unwrap();
    assert_eq!(answer, note);
}

#[tokio::test]
async fn stock_series_is_sorted_and_renamed() {
    let source = MockSource::new().with(
        Operation::TimeSeriesDaily,
        json!({
            "Meta Data": {
                "1. Information": "Daily Prices",
                "2. Symbol": "IBM",
                "3. Last Refreshed": "2024-05-02",
                "4. Output Size": "Compact",
                "5. Time Zone": "US/Eastern"
            },
            "Time Series (Daily)": {
                "2024-05-02": {"1. open": "2", "2. high": "3", "3. low": "1", "4. close": "2.5", "5. volume": "200"},
                "2024-05-01": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "100"}
            }
        }),
    );
    let params: StockSeriesParams = serde_json::from_value(json!({"symbol": "IBM"})).unwrap();

    let answer = market::get_stock_time_series(&source, params).await.unwrap();

    let metadata = &answer["metadata"];
    assert_eq!(metadata["symbol"], "IBM");
    assert_eq!(metadata["output_size"], "Compact");
    assert_eq!(metadata["time_zone"], "US/Eastern");
    assert_eq!(metadata["interval"], "daily");

    let items = answer["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["date"], "2024-05-01");
    assert_eq!(items[0]["volume"], "100");
    assert_eq!(items[1]["close"], "2.5");

    let query = source.query_for(Operation::TimeSeriesDaily);
    assert_eq!(query.get("outputsize"), Some("compact"));
    assert_eq!(query.get("datatype"), Some("json"));
}

#[tokio::test]
async fn invalid_interval_makes_no_call() {
    let source = MockSource::new();
    let params: StockSeriesParams =
        serde_json::from_value(json!({"symbol": "IBM", "interval": "2min"})).unwrap();

    let err = market::get_stock_time_series(&source, params).await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { name: "interval", .. }));
    assert!(source.calls().is_empty());
}

fn crypto_daily_document() -> serde_json::Value {
    json!({
        "Meta Data": {
            "1. Information": "Daily Prices and Volumes for Digital Currency",
            "2. Digital Currency Code": "BTC",
            "3. Digital Currency Name": "Bitcoin",
            "4. Market Code": "USD",
            "5. Market Name": "United States Dollar",
            "6. Last Refreshed": "2024-05-02 00:00:00",
            "7. Time Zone": "UTC"
        },
        "Time Series (Digital Currency Daily)": {
            "2024-05-01": {"1. open": "60000", "2. high": "61000", "3. low": "59000", "4. close": "60500", "5. volume": 12.5},
            "2024-05-02": {"1. open": "60500", "2. high": "62000", "3. low": "60000", "4. close": "61500", "5. volume": 10}
        }
    })
}

#[tokio::test]
async fn crypto_quote_uses_latest_bar() {
    // the daily endpoint delivers its document as a string
    let source = MockSource::new().with(
        Operation::DigitalCurrencyDaily,
        RawPayload::Text(crypto_daily_document().to_string()),
    );
    let params = CryptoQuoteParams {
        symbol: "BTC".to_string(),
        market: "USD".to_string(),
    };

    let answer = crypto::get_current_crypto_quote(&source, params).await.unwrap();

    assert_eq!(answer["symbol"], "BTC");
    assert_eq!(answer["name"], "Bitcoin");
    assert_eq!(answer["time_zone"], "UTC");
    assert_eq!(
        answer["current_quote"],
        json!({"date": "2024-05-02", "open": "60500", "high": "62000", "low": "60000", "close": "61500", "volume": 10})
    );
}

#[tokio::test]
async fn crypto_quote_without_series_is_malformed() {
    let source = MockSource::new().with(
        Operation::DigitalCurrencyDaily,
        json!({"Meta Data": {"2. Digital Currency Code": "BTC"}}),
    );
    let params = CryptoQuoteParams {
        symbol: "BTC".to_string(),
        market: "USD".to_string(),
    };

    let err = crypto::get_current_crypto_quote(&source, params).await.unwrap_err();
    assert!(matches!(err, Error::MalformedUpstreamShape(_)));
}

#[tokio::test]
async fn crypto_series_stringifies_values() {
    let source = MockSource::new().with(
        Operation::DigitalCurrencyDaily,
        RawPayload::Text(crypto_daily_document().to_string()),
    );
    let params = CryptoSeriesParams {
        symbol: "BTC".to_string(),
        market: "USD".to_string(),
        interval: "daily".to_string(),
        extra: Map::new(),
    };

    let answer = crypto::get_crypto_time_series(&source, params).await.unwrap();

    assert_eq!(answer["metadata"]["symbol"], "BTC");
    let items = answer["items"].as_array().unwrap();
    assert_eq!(items[0]["date"], "2024-05-01");
    assert_eq!(items[0]["volume"], "12.5");
    assert_eq!(items[1]["volume"], "10");
}

#[tokio::test]
async fn crypto_intraday_forwards_extra_params() {
    let source = MockSource::new().with(Operation::CryptoIntraday, json!({}));
    let mut extra = Map::new();
    extra.insert("outputsize".to_string(), json!("full"));
    let params = CryptoSeriesParams {
        symbol: "ETH".to_string(),
        market: "USD".to_string(),
        interval: "5min".to_string(),
        extra,
    };

    crypto::get_crypto_time_series(&source, params).await.unwrap();

    let query = source.query_for(Operation::CryptoIntraday);
    assert_eq!(query.get("interval"), Some("5min"));
    assert_eq!(query.get("outputsize"), Some("full"));
}

#[tokio::test]
async fn commodities_flatten_points() {
    let source = MockSource::new().with(
        Operation::AllCommodities,
        json!({
            "name": "Global Price Index of All Commodities",
            "interval": "monthly",
            "unit": "index 2016 = 100",
            "data": [
                {"date": "2024-04-01", "value": "165.2"},
                {"date": "2024-03-01", "value": "160.1"}
            ]
        }),
    );
    let params: CommoditiesParams = serde_json::from_value(json!({})).unwrap();

    let answer = economics::get_commodities(&source, params).await.unwrap();

    assert_eq!(answer["interval"], "monthly");
    assert_eq!(answer["commodity"], "all");
    assert!(answer.get("error").is_none());
    let data = answer["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "Global Price Index of All Commodities");
    assert_eq!(data[0]["unit"], "index 2016 = 100");
    assert_eq!(data[1]["value"], "160.1");
}

#[tokio::test]
async fn commodities_without_data_report_an_error_note() {
    let source = MockSource::new().with(Operation::AllCommodities, json!({"Information": "limit"}));
    let params: CommoditiesParams = serde_json::from_value(json!({"interval": "quarterly"})).unwrap();

    let answer = economics::get_commodities(&source, params).await.unwrap();

    assert_eq!(answer["data"], json!([]));
    assert_eq!(answer["error"], "Unexpected data format from API");
    assert_eq!(source.query_for(Operation::AllCommodities).get("interval"), Some("quarterly"));
}

#[tokio::test]
async fn market_calendar_fetches_ipos_on_request() {
    let source = MockSource::new()
        .with(
            Operation::EarningsCalendar,
            "symbol,name,reportDate,fiscalDateEnding,estimate,currency\nIBM,International Business Machines,2024-07-24,2024-06-30,2.18,USD\n",
        )
        .with(
            Operation::IpoCalendar,
            "symbol,name,ipoDate,priceRangeLow,priceRangeHigh,currency,exchange\nNEWCO,New Co,2024-07-01,10,12,USD,NYSE\n",
        );
    let params: MarketCalendarParams = serde_json::from_value(json!({"with_ipos": true})).unwrap();

    let answer = fundamentals::get_market_calendar(&source, params).await.unwrap();

    assert_eq!(answer["horizon"], "3month");
    assert_eq!(answer["earnings"][0]["report_date"], "2024-07-24");
    assert_eq!(answer["ipos"][0]["price_range_high"], "12");
    assert!(answer.get("symbol").is_none());
}

#[tokio::test]
async fn upstream_failures_propagate() {
    let source = MockSource::new();
    let params = ListingStatusParams {
        date: Some("2024-01-02".to_string()),
        state: "delisted".to_string(),
    };

    let err = fundamentals::get_listing_status(&source, params).await.unwrap_err();
    assert!(matches!(err, Error::Upstream(_)));
}

#[tokio::test]
async fn market_calendar_always_carries_ipos() {
    let source = MockSource::new().with(
        Operation::EarningsCalendar,
        "symbol,name,reportDate,fiscalDateEnding,estimate,currency\n",
    );
    let params: MarketCalendarParams =
        serde_json::from_value(json!({"symbol": "", "horizon": "6month"})).unwrap();

    let answer = fundamentals::get_market_calendar(&source, params).await.unwrap();

    assert_eq!(
        answer,
        json!({"horizon": "6month", "with_ipos": false, "earnings": [], "ipos": []})
    );
    assert_eq!(source.operations(), [Operation::EarningsCalendar]);
    assert_eq!(source.query_for(Operation::EarningsCalendar).get("symbol"), None);
}

#[tokio::test]
async fn blank_listing_date_is_treated_as_absent() {
    let source = MockSource::new().with(
        Operation::ListingStatus,
        "symbol,name,exchange,assetType,ipoDate,delistingDate,status\n",
    );
    let params = ListingStatusParams {
        date: Some(String::new()),
        state: "delisted".to_string(),
    };

    let answer = fundamentals::get_listing_status(&source, params).await.unwrap();

    assert_eq!(answer, json!({"state": "delisted", "listings": []}));
    assert_eq!(source.query_for(Operation::ListingStatus).get("date"), None);
}
