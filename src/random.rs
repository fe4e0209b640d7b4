use rand::TryRngCore;

/// Failure reported by a [RandomSource]
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct RandomSourceError(String);

impl RandomSourceError {
    /// Create an error carrying `message`
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Cryptographically secure entropy, filled on request
pub trait RandomSource {
    /// Fill `buffer` completely, or report failure
    fn try_fill(&mut self, buffer: &mut [u8]) -> Result<(), RandomSourceError>;
}

impl<R: TryRngCore + ?Sized> RandomSource for R {
    fn try_fill(&mut self, buffer: &mut [u8]) -> Result<(), RandomSourceError> {
        self.try_fill_bytes(buffer)
            .map_err(|err| RandomSourceError::new(err.to_string()))
    }
}

/// Adapts a callback that fills a buffer and returns `false` on failure
#[derive(Debug, Clone)]
pub struct FnRandom<F>(pub F);

impl<F> RandomSource for FnRandom<F>
where
    F: FnMut(&mut [u8]) -> bool,
{
    fn try_fill(&mut self, buffer: &mut [u8]) -> Result<(), RandomSourceError> {
        if (self.0)(buffer) {
            Ok(())
        } else {
            Err(RandomSourceError::new("random callback reported failure"))
        }
    }
}
