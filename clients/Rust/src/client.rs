use crate::error::{LpApiError, Result};
use crate::types::{ErrorBody, SolveRequest, SolveResult, SolversResponse};
use reqwest::{Client, Response, Url};

/// HTTP client for interacting with the LP solve REST API
#[derive(Debug, Clone)]
pub struct LpClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl LpClient {
    /// Create a new LP API client
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the API (e.g., "http://localhost:9000")
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lp_api_sdk::LpClient;
    ///
    /// let client = LpClient::new("http://localhost:9000").unwrap();
    /// ```
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom reqwest client
    ///
    /// This allows you to configure timeouts, proxies, etc.
    pub fn with_client(base_url: impl AsRef<str>, client: Client) -> Result<Self> {
        let base_url =
            Url::parse(base_url.as_ref()).map_err(|e| LpApiError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: None,
        })
    }

    /// Set the API key sent as `X-API-Key`
    ///
    /// Needed when the server runs with `PROTECT=true`.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| LpApiError::InvalidUrl(e.to_string()))
    }

    /// Check the health of the API server
    pub async fn health_check(&self) -> Result<bool> {
        let response = self.client.get(self.endpoint("/health")?).send().await?;
        Ok(response.status().is_success())
    }

    /// List the solver backends the server accepts in `solver_name`
    pub async fn solvers(&self) -> Result<SolversResponse> {
        let response = self.client.get(self.endpoint("/solvers")?).send().await?;
        let response = check(response).await?;

        response
            .json()
            .await
            .map_err(|e| LpApiError::ParseError(e.to_string()))
    }

    /// Solve a linear program
    ///
    /// A well-formed problem always yields `Ok`, including infeasible and
    /// unbounded ones; inspect [`SolveResult::status`]. Problems the server
    /// refuses to build come back as [`LpApiError::Rejected`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use lp_api_sdk::{Constraint, LpClient, SolveRequestBuilder, Status};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = LpClient::new("http://localhost:9000")?;
    ///
    /// let request = SolveRequestBuilder::new()
    ///     .add_variable("x", Some(0.0), Some(100.0))
    ///     .add_variable("y", Some(0.0), Some(100.0))
    ///     .add_constraint(Constraint::less_eq([("x", 1.0), ("y", 1.0)], 10.0))
    ///     .maximize([("x", 1.0), ("y", 2.0)])
    ///     .build()?;
    ///
    /// let result = client.solve(request).await?;
    /// if result.status == Status::Optimal {
    ///     println!("Objective: {:?}", result.objective_value);
    ///     println!("Values: {:?}", result.variables);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn solve(&self, request: SolveRequest) -> Result<SolveResult> {
        let mut req_builder = self.client.post(self.endpoint("/solve")?).json(&request);

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("X-API-Key", api_key);
        }

        let response = check(req_builder.send().await?).await?;

        response
            .json()
            .await
            .map_err(|e| LpApiError::ParseError(e.to_string()))
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(match status.as_u16() {
        401 | 403 => LpApiError::AuthenticationFailed,
        _ => rejection(&error_text).unwrap_or(LpApiError::ApiError(error_text)),
    })
}

fn rejection(body: &str) -> Option<LpApiError> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.kind.map(|kind| LpApiError::Rejected {
        kind,
        message: parsed.error,
    })
}
