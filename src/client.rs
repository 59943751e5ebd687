use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_PRINCIPAL: f64 = 100_000_000.0;
pub const MIN_RATE: f64 = 1.0;
pub const MAX_RATE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanRequest {
    #[serde(rename = "loan_amount")]
    pub principal: f64,
    #[serde(rename = "interest_rate")]
    pub rate: f64,
    #[serde(rename = "loan_tenure")]
    pub tenure_months: u32,
}

/// Response body of `/calculate`, taken as the backend sends it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoanResult {
    #[serde(default)]
    pub monthly_emi: Option<f64>,
    #[serde(default)]
    pub total_amount_payable: Option<f64>,
    #[serde(default)]
    pub total_interest: Option<f64>,
}

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("backend error (status {status})")]
    Backend { status: StatusCode },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait Calculator: Send + Sync {
    async fn calculate(&self, request: &LoanRequest) -> Result<LoanResult, CalcError>;
}

/// Talks to the `/calculate` endpoint of an EMI backend.
#[derive(Debug, Clone)]
pub struct CalcClient {
    http: Client,
    server_url: String,
}

impl CalcClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            server_url,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/calculate", self.server_url)
    }
}

#[async_trait]
impl Calculator for CalcClient {
    async fn calculate(&self, request: &LoanRequest) -> Result<LoanResult, CalcError> {
        let response = self.http.post(self.endpoint()).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalcError::Backend { status });
        }

        Ok(response.json::<LoanResult>().await?)
    }
}
