//! AWS Lambda HTTP handler for the EMI calculator
//!
//! POST a JSON `CalculationRequest`, receive a `CalculationReport`

use emi_calculator::{CalculationReport, CalculationRequest, Calculator, LoanError};
use lambda_http::{run, service_fn, Body, Error, Request, Response};

/// Decode the body and run the calculation
/// Returns the HTTP status alongside the report
fn handle_body(calculator: &Calculator, body: &[u8]) -> (u16, CalculationReport) {
    let request: CalculationRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("rejecting malformed request body: {}", e);
            return (400, CalculationReport::from_error(&LoanError::from(e)));
        }
    };

    let report = calculator.report(&request);
    // Economically infeasible or out-of-range inputs are still a well-formed answer
    (200, report)
}

async fn function_handler(calculator: &Calculator, event: Request) -> Result<Response<Body>, Error> {
    let (status, report) = handle_body(calculator, &event.body()[..]);
    let json = serde_json::to_string(&report)?;

    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(json))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let calculator = Calculator::default();
    let calculator = &calculator;
    run(service_fn(move |event: Request| async move {
        function_handler(calculator, event).await
    }))
    .await
}
