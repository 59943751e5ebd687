//! Worker thread that runs calculations off the UI thread.

use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error};

use crate::client::{CalcError, Calculator, LoanRequest, LoanResult};

#[derive(Debug, Clone)]
pub struct CalcCommand {
    pub seq: u64,
    pub request: LoanRequest,
}

#[derive(Debug)]
pub enum UiEvent {
    Calculated {
        seq: u64,
        request: LoanRequest,
        outcome: Result<LoanResult, CalcError>,
    },
    BridgeDown(String),
}

/// Each command runs as its own task, so a slow response never holds up a
/// newer one. The worker stops once every command sender is dropped.
pub fn spawn(
    calculator: Arc<dyn Calculator>,
    cmd_rx: Receiver<CalcCommand>,
    ui_tx: Sender<UiEvent>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("emi-bridge".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build calculation runtime: {err}");
                    let _ = ui_tx.send(UiEvent::BridgeDown(err.to_string()));
                    return;
                }
            };

            for CalcCommand { seq, request } in cmd_rx.iter() {
                let calculator = calculator.clone();
                let ui_tx = ui_tx.clone();
                runtime.spawn(async move {
                    debug!(seq, ?request, "requesting calculation");
                    let outcome = calculator.calculate(&request).await;
                    if ui_tx
                        .send(UiEvent::Calculated {
                            seq,
                            request,
                            outcome,
                        })
                        .is_err()
                    {
                        debug!(seq, "ui gone, dropping calculation result");
                    }
                });
            }

            debug!("command channel closed, calculation worker exiting");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crossbeam_channel::unbounded;
    use reqwest::StatusCode;
    use std::time::Duration;

    struct Fixed;

    #[async_trait]
    impl Calculator for Fixed {
        async fn calculate(&self, request: &LoanRequest) -> Result<LoanResult, CalcError> {
            if request.tenure_months == 0 {
                return Err(CalcError::Backend {
                    status: StatusCode::BAD_REQUEST,
                });
            }
            Ok(LoanResult {
                monthly_emi: Some(request.principal / request.tenure_months as f64),
                total_amount_payable: Some(request.principal),
                total_interest: Some(0.0),
            })
        }
    }

    fn request(tenure_months: u32) -> LoanRequest {
        LoanRequest {
            principal: 1200.0,
            rate: 10.0,
            tenure_months,
        }
    }

    #[test]
    fn reports_each_command_back_with_its_sequence() {
        let (cmd_tx, cmd_rx) = unbounded();
        let (ui_tx, ui_rx) = unbounded();
        let handle = spawn(Arc::new(Fixed), cmd_rx, ui_tx).expect("spawn bridge");

        cmd_tx
            .send(CalcCommand {
                seq: 1,
                request: request(12),
            })
            .expect("send");
        cmd_tx
            .send(CalcCommand {
                seq: 2,
                request: request(0),
            })
            .expect("send");

        let mut seen = Vec::new();
        for _ in 0..2 {
            match ui_rx.recv_timeout(Duration::from_secs(5)).expect("event") {
                UiEvent::Calculated { seq, outcome, .. } => seen.push((seq, outcome.is_ok())),
                UiEvent::BridgeDown(reason) => panic!("bridge down: {reason}"),
            }
        }
        seen.sort();
        assert_eq!(seen, vec![(1, true), (2, false)]);

        drop(cmd_tx);
        handle.join().expect("bridge thread");
    }
}
