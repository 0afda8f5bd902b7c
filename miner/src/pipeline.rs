use alloy::primitives::Address;
use tracing::{info, warn};

use crate::{
    chain::{ClaimReceipt, ClaimStatus, ClaimTransport, DistributorReader},
    error::{MinerError, ProofError},
    signer::ClaimSigner,
    submitter::BatchSubmitter,
    tree::RecipientTree,
    validator::ProofValidator,
    Result,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub recipients: Vec<Address>,
    pub receipt: ClaimReceipt,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClaimReport {
    pub batches: Vec<BatchOutcome>,
    pub ineligible: Vec<ProofError>,
    pub already_claimed: Vec<Address>,
    /// Recipients whose claim status could not be read; they were still submitted.
    pub unknown_status: Vec<Address>,
}

impl ClaimReport {
    pub fn submitted(&self) -> usize {
        self.batches.iter().map(|b| b.recipients.len()).sum()
    }
}

/// Runs consistency check, per-recipient filtering and batch submission in order.
pub struct ClaimPipeline<'a, T, R, C, S> {
    validator: ProofValidator<'a, T, R>,
    submitter: BatchSubmitter<'a, T, C, S>,
}

impl<'a, T, R, C, S> ClaimPipeline<'a, T, R, C, S>
where
    T: RecipientTree,
    R: DistributorReader + Sync,
    C: ClaimTransport + Sync,
    S: ClaimSigner,
{
    pub fn new(validator: ProofValidator<'a, T, R>, submitter: BatchSubmitter<'a, T, C, S>) -> Self {
        Self {
            validator,
            submitter,
        }
    }

    pub fn submitter(&self) -> &BatchSubmitter<'a, T, C, S> {
        &self.submitter
    }

    /// Splits the eligible recipients into batches of `batch_size` and submits
    /// them one after another. The first failed batch stops the run.
    pub async fn run(
        &self,
        recipients: &[Address],
        batch_size: usize,
        gas_price: u128,
    ) -> Result<ClaimReport> {
        if batch_size == 0 {
            return Err(MinerError::InvalidBatchSize);
        }

        self.validator.check_consistency().await?;

        let mut report = ClaimReport::default();
        let mut eligible = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            if let Err(e) = self.validator.validate_proof(recipient) {
                warn!("Skipping {}: {}", recipient, e);
                report.ineligible.push(e);
                continue;
            }

            match self.validator.has_claimed(recipient).await {
                ClaimStatus::Claimed => {
                    info!("Allocation for {} already generated", recipient);
                    report.already_claimed.push(*recipient);
                }
                ClaimStatus::NotClaimed => eligible.push(*recipient),
                ClaimStatus::Unknown => {
                    report.unknown_status.push(*recipient);
                    eligible.push(*recipient);
                }
            }
        }

        info!(
            "{} of {} recipients eligible, submitting in batches of {}",
            eligible.len(),
            recipients.len(),
            batch_size
        );

        for batch in eligible.chunks(batch_size) {
            let receipt = self.submitter.submit_batch(batch, gas_price).await?;
            report.batches.push(BatchOutcome {
                recipients: batch.to_vec(),
                receipt,
            });
        }

        Ok(report)
    }
}
