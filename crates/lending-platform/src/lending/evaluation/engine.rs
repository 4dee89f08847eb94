use tracing::debug;

/// A single eligibility check over a subject.
///
/// `is_satisfied` must be a pure function of the subject. Exactly one of
/// `on_success` / `on_failure` is invoked per evaluation, and `on_failure`
/// records a single human readable reason on the subject without touching
/// the ones already recorded.
pub trait Rule<T>: Send + Sync {
    fn is_satisfied(&self, subject: &T) -> bool;

    fn on_success(&self, _subject: &mut T) {}

    fn on_failure(&self, subject: &mut T);

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Ordered collection of rules evaluated without short-circuiting.
pub struct RuleEngine<T> {
    rules: Vec<Box<dyn Rule<T>>>,
}

impl<T> RuleEngine<T> {
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Rule<T>>>,
    {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Builds an engine from an optional rule collection. A missing collection
    /// is an error; an empty one is valid and approves everything.
    pub fn try_new(rules: Option<Vec<Box<dyn Rule<T>>>>) -> Result<Self, EngineError> {
        rules
            .map(Self::new)
            .ok_or(EngineError::InvalidInput("rules"))
    }

    /// Appends a rule. Subjects evaluated earlier are not revisited.
    pub fn add_rule(&mut self, rule: Box<dyn Rule<T>>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Runs every rule in order against the subject.
    pub fn execute(&self, subject: &mut T) {
        for rule in &self.rules {
            if rule.is_satisfied(subject) {
                rule.on_success(subject);
            } else {
                debug!(rule = rule.name(), "rule not satisfied");
                rule.on_failure(subject);
            }
        }
    }

    /// Like [`RuleEngine::execute`], but rejects an absent subject before any
    /// rule runs.
    pub fn try_execute(&self, subject: Option<&mut T>) -> Result<(), EngineError> {
        let subject = subject.ok_or(EngineError::InvalidInput("subject"))?;
        self.execute(subject);
        Ok(())
    }
}

impl<T> Default for RuleEngine<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> std::fmt::Debug for RuleEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {0} cannot be absent")]
    InvalidInput(&'static str),
}
