use crate::config::TopicsMode;
use crate::error::LoggerError;
use crate::levels::Level;
use crate::output::Target;

/// Handle of a registered topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TopicId(usize);

impl TopicId {
    pub(crate) const fn new(index: usize) -> Self {
        TopicId(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct Topic {
    pub(crate) name: String,
    pub(crate) target: Target,
    pub(crate) enabled: bool,
    pub(crate) level: Level,
}

pub(crate) struct Topics {
    mode: TopicsMode,
    entries: Vec<Option<Topic>>,
}

impl Topics {
    pub(crate) fn new(mode: TopicsMode) -> Self {
        let entries = match mode {
            TopicsMode::Static(n) => Vec::with_capacity(n),
            TopicsMode::Dynamic => Vec::new(),
        };
        Self { mode, entries }
    }

    fn check_enabled(&self) -> Result<(), LoggerError> {
        if self.mode.is_enabled() {
            Ok(())
        } else {
            Err(LoggerError::Disabled)
        }
    }

    /// Registers `name`, or returns the id it already has.
    pub(crate) fn add(&mut self, name: &str, target: Target, enabled: bool) -> Result<TopicId, LoggerError> {
        self.check_enabled()?;
        if name.is_empty() {
            return Err(LoggerError::InvalidArgument);
        }
        if let Some(id) = self.get_id(name) {
            return Ok(id);
        }

        let topic = Topic {
            name: name.to_string(),
            target,
            enabled,
            level: Level::TRACE,
        };

        if let Some(index) = self.entries.iter().position(Option::is_none) {
            self.entries[index] = Some(topic);
            return Ok(TopicId::new(index));
        }
        if let TopicsMode::Static(capacity) = self.mode {
            if self.entries.len() >= capacity {
                return Err(LoggerError::TopicsFull);
            }
        }
        self.entries.push(Some(topic));
        Ok(TopicId(self.entries.len() - 1))
    }

    pub(crate) fn get_id(&self, name: &str) -> Option<TopicId> {
        if name.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|t| t.as_ref().is_some_and(|t| t.name == name))
            .map(TopicId)
    }

    pub(crate) fn get(&self, name: &str) -> Option<(TopicId, &Topic)> {
        let id = self.get_id(name)?;
        self.entries[id.0].as_ref().map(|t| (id, t))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Topic, LoggerError> {
        self.check_enabled()?;
        if name.is_empty() {
            return Err(LoggerError::InvalidArgument);
        }
        let id = self.get_id(name).ok_or(LoggerError::NotFound)?;
        self.entries[id.0].as_mut().ok_or(LoggerError::NotFound)
    }

    pub(crate) fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), LoggerError> {
        self.get_mut(name)?.enabled = enabled;
        Ok(())
    }

    pub(crate) fn set_all_enabled(&mut self, enabled: bool) -> Result<(), LoggerError> {
        self.check_enabled()?;
        for topic in self.entries.iter_mut().flatten() {
            topic.enabled = enabled;
        }
        Ok(())
    }

    pub(crate) fn set_level(&mut self, name: &str, level: Level) -> Result<(), LoggerError> {
        self.get_mut(name)?.level = level;
        Ok(())
    }

    pub(crate) fn remove(&mut self, name: &str) -> Result<(), LoggerError> {
        self.check_enabled()?;
        if name.is_empty() {
            return Err(LoggerError::InvalidArgument);
        }
        let id = self.get_id(name).ok_or(LoggerError::NotFound)?;
        self.entries[id.0] = None;
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_returns_same_id() {
        let mut topics = Topics::new(TopicsMode::Dynamic);
        let net = topics.add("network", Target::All, true).unwrap();
        let storage = topics.add("storage", Target::All, false).unwrap();
        assert_ne!(net, storage);
        assert_eq!(topics.add("network", Target::All, true).unwrap(), net);
        assert_eq!(topics.get_id("storage"), Some(storage));
    }

    #[test]
    fn invalid_names() {
        let mut topics = Topics::new(TopicsMode::Dynamic);
        assert!(matches!(topics.add("", Target::All, true), Err(LoggerError::InvalidArgument)));
        assert_eq!(topics.get_id(""), None);
        assert!(matches!(topics.remove(""), Err(LoggerError::InvalidArgument)));
        assert!(matches!(topics.remove("nope"), Err(LoggerError::NotFound)));
        assert!(matches!(topics.set_enabled("nope", true), Err(LoggerError::NotFound)));
        assert!(matches!(topics.set_level("nope", Level::WARN), Err(LoggerError::NotFound)));
    }

    #[test]
    fn static_capacity_and_slot_reuse() {
        let mut topics = Topics::new(TopicsMode::Static(2));
        let a = topics.add("a", Target::All, true).unwrap();
        topics.add("b", Target::All, true).unwrap();
        assert!(matches!(topics.add("c", Target::All, true), Err(LoggerError::TopicsFull)));

        topics.remove("a").unwrap();
        assert_eq!(topics.get_id("a"), None);
        assert_eq!(topics.add("c", Target::All, true).unwrap(), a);
    }

    #[test]
    fn disabled_mode() {
        let mut topics = Topics::new(TopicsMode::Static(0));
        assert!(matches!(topics.add("t0", Target::All, true), Err(LoggerError::Disabled)));
        assert!(matches!(topics.set_enabled("t0", true), Err(LoggerError::Disabled)));
        assert!(matches!(topics.set_all_enabled(false), Err(LoggerError::Disabled)));
        assert_eq!(topics.get_id("t0"), None);
    }

    #[test]
    fn enable_all_only_touches_existing() {
        let mut topics = Topics::new(TopicsMode::Dynamic);
        topics.add("one", Target::All, false).unwrap();
        topics.set_all_enabled(true).unwrap();
        assert!(topics.get("one").unwrap().1.enabled);
        assert!(topics.get("two").is_none());
    }
}
