//! # Delivery
//!
//! Pushes an encoded job to the printer with the resilience the hardware
//! needs: one job at a time, a bounded number of attempts, a hard deadline
//! per attempt and a cooldown between attempts. When every attempt fails
//! the configured notification sink is told, fire-and-forget, and the
//! caller gets the classified error of the last attempt.
//!
//! A timed-out attempt is abandoned, not killed. The blocking worker keeps
//! running until its write returns; the printer lock stays held for the
//! whole delivery, so an abandoned worker cannot interleave with the next
//! job's bytes.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

use crate::notify::NotificationSink;
use crate::protocol::EncodedJob;
use crate::transport::{classify, ClassifiedError, Transport};

/// Mutual exclusion over the physical printer.
///
/// A wrapper over a single-permit semaphore. `try_acquire` never waits;
/// a busy printer is reported to the caller immediately rather than
/// queueing jobs against a device that prints at a few lines per second.
#[derive(Clone)]
pub struct PrinterLock {
    semaphore: Arc<Semaphore>,
}

impl PrinterLock {
    pub fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
        }
    }

    /// Take the lock without waiting. `None` means a print is in flight.
    pub fn try_acquire(&self) -> Option<OwnedSemaphorePermit> {
        match self.semaphore.clone().try_acquire_owned() {
            Ok(permit) => Some(permit),
            Err(TryAcquireError::NoPermits) => None,
            // The semaphore is never closed
            Err(TryAcquireError::Closed) => None,
        }
    }

    /// Whether a print is currently in flight.
    pub fn is_held(&self) -> bool {
        self.semaphore.available_permits() == 0
    }
}

impl Default for PrinterLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Attempt limits and pacing for one delivery.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Cooldown between attempts.
    pub backoff: Duration,
    /// Hard deadline per attempt.
    pub attempt_deadline: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_secs(5),
            attempt_deadline: Duration::from_secs(30),
        }
    }
}

/// Terminal state of one delivery.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The job reached the printer.
    Printed { attempts: u32 },
    /// Another job held the printer lock; nothing was attempted.
    Busy,
    /// Every attempt failed; this is the last attempt's classification.
    Failed(ClassifiedError),
}

/// Owns the transport, the printer lock and the failure sink.
pub struct Deliverer {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn NotificationSink>,
    lock: PrinterLock,
    policy: RetryPolicy,
}

impl Deliverer {
    pub fn new(
        transport: Arc<dyn Transport>,
        sink: Arc<dyn NotificationSink>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            sink,
            lock: PrinterLock::new(),
            policy,
        }
    }

    pub fn lock(&self) -> &PrinterLock {
        &self.lock
    }

    /// Deliver one encoded job.
    pub async fn deliver(&self, job: EncodedJob) -> DeliveryOutcome {
        let Some(permit) = self.lock.try_acquire() else {
            return DeliveryOutcome::Busy;
        };
        // Held until this function returns, covering abandoned workers too
        let _permit = permit;

        let payload = Arc::new(job.into_bytes());
        let mut last_error = ClassifiedError::Unknown("no attempt made".to_string());

        for attempt in 1..=self.policy.max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.policy.backoff).await;
            }

            let bytes = Arc::clone(&payload);
            let transport = Arc::clone(&self.transport);
            let work = tokio::task::spawn_blocking(move || transport.send(&bytes));

            match tokio::time::timeout(self.policy.attempt_deadline, work).await {
                Ok(Ok(Ok(()))) => {
                    info!("print delivered on attempt {}", attempt);
                    return DeliveryOutcome::Printed { attempts: attempt };
                }
                Ok(Ok(Err(e))) => {
                    last_error = classify(&e);
                    warn!("attempt {} failed: {}", attempt, e);
                }
                Ok(Err(join_err)) => {
                    last_error = ClassifiedError::Unknown(format!(
                        "print worker panicked: {}",
                        join_err
                    ));
                    warn!("attempt {}: {}", attempt, last_error);
                }
                Err(_) => {
                    // The worker is left to finish on its own; the held
                    // lock keeps its late bytes from racing the next job.
                    last_error = ClassifiedError::Timeout;
                    warn!(
                        "attempt {} exceeded {:?}, abandoning",
                        attempt, self.policy.attempt_deadline
                    );
                }
            }
        }

        let sink = Arc::clone(&self.sink);
        let message = last_error.to_string();
        tokio::spawn(async move {
            if let Err(e) = sink.notify("Print failed", &message).await {
                warn!("failure notification not delivered: {}", e);
            }
        });

        DeliveryOutcome::Failed(last_error)
    }
}

// ============================================================================
// TESTS
// ============================================================================
