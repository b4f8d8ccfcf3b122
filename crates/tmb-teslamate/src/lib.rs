//! TeslaMate API adapter.
//!
//! Implements the `tmb-core` telemetry port with plain authenticated GETs.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;

use tmb_core::{
    config::TeslaMateConfig,
    domain::CarId,
    errors::Error,
    telemetry::{
        drive_window_start, paths,
        types::{
            BatteryHealthSnapshot, Car, CarsData, ChargeSnapshot, ChargesData, DriveSnapshot,
            DrivesData, Envelope, StatusSnapshot,
        },
        TelemetryClient, DRIVE_LOOKBACK_DAYS,
    },
    Result,
};

#[derive(Clone, Debug)]
pub struct TeslaMateClient {
    base_url: String,
    api_key: Option<String>,
    car_id: CarId,
    http: reqwest::Client,
}

impl TeslaMateClient {
    /// Build a client from validated config. Custom headers are sent on every
    /// request and win over the defaults, including the bearer token.
    pub fn new(cfg: &TeslaMateConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (k, v) in &cfg.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| Error::Config(format!("invalid header name {k:?}: {e}")))?;
            let value = HeaderValue::from_str(v)
                .map_err(|e| Error::Config(format!("invalid value for header {k:?}: {e}")))?;
            headers.insert(name, value);
        }
        let custom_auth = headers.contains_key(AUTHORIZATION);

        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;

        Ok(Self {
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
            api_key: cfg
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty() && !custom_auth),
            car_id: cfg.car_id(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let mut req = self.http.get(&url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl TelemetryClient for TeslaMateClient {
    async fn car_details(&self) -> Result<Car> {
        let env: Envelope<CarsData> = self.get_json(&paths::car(self.car_id), &[]).await?;
        env.data
            .cars
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound("no vehicle found".to_string()))
    }

    async fn car_status(&self) -> Result<StatusSnapshot> {
        let env: Envelope<StatusSnapshot> =
            self.get_json(&paths::status(self.car_id), &[]).await?;
        Ok(env.data)
    }

    async fn battery_health(&self) -> Result<BatteryHealthSnapshot> {
        let env: Envelope<BatteryHealthSnapshot> = self
            .get_json(&paths::battery_health(self.car_id), &[])
            .await?;
        Ok(env.data)
    }

    async fn latest_charge(&self) -> Result<ChargeSnapshot> {
        let env: Envelope<ChargesData> = self.get_json(&paths::charges(self.car_id), &[]).await?;
        let ChargesData { charges, units, .. } = env.data;
        let charge = charges
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound("no charge records".to_string()))?;
        Ok(ChargeSnapshot { charge, units })
    }

    async fn latest_drive(&self) -> Result<DriveSnapshot> {
        let query = [("startDate", drive_window_start(Utc::now()))];
        let env: Envelope<DrivesData> = self
            .get_json(&paths::drives(self.car_id), &query)
            .await?;
        let DrivesData { drives, units, .. } = env.data;
        let drive = drives.into_iter().next().ok_or_else(|| {
            Error::NotFound(format!("no drive in last {DRIVE_LOOKBACK_DAYS} days"))
        })?;
        Ok(DriveSnapshot { drive, units })
    }
}
