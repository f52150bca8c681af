/// Issues increasing tokens for requests that refresh the same piece of state. Only the response
/// to the most recently issued token is current, so a slow stale response cannot overwrite the
/// result of a newer request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSequence {
    /// Last issued token, zero before the first request
    latest: u64,
}

/// Token identifying one request issued by a [RequestSequence]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestSequence {
    /// Sequence that has issued nothing yet
    pub const fn new() -> Self {
        Self { latest: 0 }
    }

    /// Token for a new request, superseding every earlier one
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// True when no request was issued after `token`
    pub const fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
mod test {
    use super::RequestSequence;

    #[test]
    fn only_latest_token_should_be_current() {
        let mut sequence = RequestSequence::new();

        let first = sequence.issue();
        assert!(sequence.is_current(first));

        let second = sequence.issue();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }
}
