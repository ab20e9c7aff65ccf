use lp_api_sdk::{Constraint, LpApiError, LpClient, SolveRequestBuilder};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_url = env::var("LP_API_URL").unwrap_or_else(|_| "http://127.0.0.1:9000".to_string());
    let api_key = env::var("LP_API_KEY").ok();

    let mut client = LpClient::new(&api_url)?;

    if let Some(key) = api_key {
        println!("🔐 Using API key authentication");
        client = client.with_api_key(key);
    } else {
        println!("⚠ No API key provided (set LP_API_KEY environment variable)");
    }

    // maximize x + 2y subject to 2x + 3y <= 100, 0 <= x, y <= 100
    let request = SolveRequestBuilder::new()
        .add_variable("x", Some(0.0), Some(100.0))
        .add_variable("y", Some(0.0), Some(100.0))
        .add_constraint(Constraint::less_eq([("x", 2.0), ("y", 3.0)], 100.0))
        .maximize([("x", 1.0), ("y", 2.0)])
        .build()?;

    println!("📊 Solving optimization problem...");

    match client.solve(request).await {
        Ok(result) => {
            println!("✓ Success!\n");
            println!("Status: {:?}", result.status);
            println!("Objective: {:?}", result.objective_value);
            println!("Variables: {:?}", result.variables);
        }
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            if matches!(e, LpApiError::AuthenticationFailed) {
                eprintln!("\nTip: Make sure LP_API_KEY is set correctly");
            }
            return Err(e.into());
        }
    }

    Ok(())
}
