use reverse_lookup::domain::PhoneNumber;
use reverse_lookup::error::{LookupError, LookupResult};
use reverse_lookup::models::{
    ContactPhone, ContactRecord, ContactRecordBuilder, ContactSource, Name, PhoneType,
};
use reverse_lookup::providers::LookupProvider;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// What a [`MockProvider`] answers.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Nothing found
    Miss,
    /// A record with this display name
    Hit(&'static str),
    /// A record with no name and no phone number
    Empty,
    /// A configuration failure
    Fail,
}

/// Mock provider for testing.
///
/// Answers with a fixed outcome, optionally after a delay, and counts calls.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockProvider {
    name: String,
    outcome: MockOutcome,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new(name: &str, outcome: MockOutcome) -> Self {
        Self {
            name: name.to_string(),
            outcome,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times `lookup` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A record as a `Hit` outcome would produce it.
    pub fn record_for(name: &str, number: &PhoneNumber) -> ContactRecord {
        let mut builder = ContactRecordBuilder::new(ContactSource::ReverseLookup);
        builder
            .set_name(Name::new(name))
            .add_phone_number(ContactPhone::new(number.display(), PhoneType::Main));
        builder.build()
    }
}

impl LookupProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, number: &PhoneNumber) -> LookupResult<Option<ContactRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        match &self.outcome {
            MockOutcome::Miss => Ok(None),
            MockOutcome::Hit(name) => Ok(Some(Self::record_for(name, number))),
            MockOutcome::Empty => Ok(Some(ContactRecordBuilder::default().build())),
            MockOutcome::Fail => Err(LookupError::InvalidConfig(format!(
                "{} has no endpoint",
                self.name
            ))),
        }
    }
}
