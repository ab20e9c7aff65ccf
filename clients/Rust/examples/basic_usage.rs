use lp_api_sdk::{Constraint, LpClient, SolveRequestBuilder, Status};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = LpClient::new("http://127.0.0.1:9000")?;

    match client.health_check().await {
        Ok(true) => println!("✓ Server is healthy"),
        Ok(false) => println!("⚠ Server returned non-success status"),
        Err(e) => println!("✗ Health check failed: {}", e),
    }

    let solvers = client.solvers().await?;
    println!("Backends: {:?} (default {})", solvers.solvers, solvers.default);

    // Product mix:
    //   maximize 3*chairs + 5*tables
    //   wood:  chairs + 2*tables <= 14
    //   labor: 3*chairs - tables >= 0
    //   chairs - tables <= 4
    let request = SolveRequestBuilder::new()
        .add_variable("chairs", Some(0.0), None)
        .add_variable("tables", Some(0.0), None)
        .add_constraint(Constraint::less_eq([("chairs", 1.0), ("tables", 2.0)], 14.0).named("wood"))
        .add_constraint(Constraint::greater_eq([("chairs", 3.0), ("tables", -1.0)], 0.0).named("labor"))
        .add_constraint(Constraint::less_eq([("chairs", 1.0), ("tables", -1.0)], 4.0))
        .maximize([("chairs", 3.0), ("tables", 5.0)])
        .build()?;

    println!("\n📊 Solving linear program...\n");

    let result = client.solve(request).await?;

    println!("Status: {:?} ({} iterations, {} ms)", result.status, result.iterations, result.wall_time_ms);
    if matches!(result.status, Status::Optimal | Status::Feasible) {
        println!("Objective value: {:?}", result.objective_value);
        for (name, value) in result.variables.iter().flatten() {
            println!("  {} = {}", name, value);
        }
        println!("Reduced costs:");
        for (name, value) in result.reduced_costs.iter().flatten() {
            println!("  {} = {}", name, value);
        }
    }

    Ok(())
}
