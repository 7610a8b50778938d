//! Command dispatch
//!
//! Owns the cache session and turns parsed commands into reply text.
//! Every command that changes the cache appends the state line to its
//! reply so the recency order is always visible; a miss changes nothing
//! and gets no state line.

use recency::{CacheSession, PutOutcome};

use crate::command::Command;

/// Executes commands against one cache session.
pub struct CommandHandler {
    session: CacheSession<i64, String>,
}

impl CommandHandler {
    /// Create a handler with an empty cache of the given capacity.
    pub fn new(capacity: usize) -> recency::Result<Self> {
        Ok(Self {
            session: CacheSession::new(capacity)?,
        })
    }

    /// Execute one command and return the full reply text.
    pub fn handle(&mut self, cmd: Command) -> String {
        match cmd {
            Command::Get { key } => self.handle_get(key),
            Command::Put { key, value } => self.handle_put(key, value),
            Command::State => self.render_state(),
            Command::Stats => self.render_stats(),
            Command::Reset => self.handle_reset(),
            Command::Capacity { capacity } => self.handle_capacity(capacity),
            Command::Help => help_text(),
            Command::Quit => "bye".to_string(),
        }
    }

    fn handle_get(&mut self, key: i64) -> String {
        let line = match self.session.get(&key) {
            Some(value) => format!("GET {} -> \"{}\" (hit)", key, value),
            None => return format!("GET {} (miss)", key),
        };
        format!("{}\n{}", line, self.render_state())
    }

    fn handle_put(&mut self, key: i64, value: String) -> String {
        let mut lines = Vec::new();
        match self.session.put(key, value.clone()) {
            PutOutcome::Inserted => {
                lines.push(format!("PUT {} -> \"{}\" (added)", key, value));
            }
            PutOutcome::Updated => {
                lines.push(format!("PUT {} -> \"{}\" (updated)", key, value));
            }
            PutOutcome::Evicted(old_key) => {
                lines.push(format!(
                    "cache full: evicted key {} to admit key {}",
                    old_key, key
                ));
                lines.push(format!("PUT {} -> \"{}\" (added)", key, value));
            }
        }
        lines.push(self.render_state());
        lines.join("\n")
    }

    fn handle_reset(&mut self) -> String {
        self.session.reset();
        format!("cache cleared\n{}", self.render_state())
    }

    fn handle_capacity(&mut self, capacity: usize) -> String {
        match self.session.set_capacity(capacity) {
            Ok(()) => format!("capacity set to {}\n{}", capacity, self.render_state()),
            Err(err) => format!("error: {}", err),
        }
    }

    fn render_state(&self) -> String {
        if self.session.is_empty() {
            return "cache is empty".to_string();
        }
        let entries: Vec<String> = self
            .session
            .cache()
            .iter()
            .map(|(key, value)| format!("[{}:\"{}\"]", key, value))
            .collect();
        format!("state (MRU -> LRU): {}", entries.join(" "))
    }

    fn render_stats(&self) -> String {
        let stats = self.session.stats();
        format!(
            "hits: {}  misses: {}  hit ratio: {:.2}%\n\
             inserts: {}  updates: {}  evictions: {}\n\
             entries: {}/{}",
            stats.hits(),
            stats.misses(),
            stats.hit_ratio() * 100.0,
            stats.inserts(),
            stats.updates(),
            stats.evictions(),
            self.session.len(),
            self.session.capacity(),
        )
    }
}

fn help_text() -> String {
    "\
commands:
  PUT <key> <value>   insert or update an entry (value may contain spaces)
  GET <key>           look up a key and promote it to most recent
  STATE               show entries, most recent first
  STATS               show hit/miss and churn counters
  RESET               drop all entries, keep counters and capacity
  CAPACITY <n>        start over with an empty cache of capacity n
  HELP                this text
  QUIT | EXIT         leave the shell"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(capacity: usize) -> CommandHandler {
        CommandHandler::new(capacity).unwrap()
    }

    fn put(h: &mut CommandHandler, key: i64, value: &str) -> String {
        h.handle(Command::Put {
            key,
            value: value.to_string(),
        })
    }

    #[test]
    fn test_handle_put_and_get_hit() {
        let mut h = handler(3);
        let reply = put(&mut h, 1, "apple");
        assert_eq!(
            reply,
            "PUT 1 -> \"apple\" (added)\nstate (MRU -> LRU): [1:\"apple\"]"
        );
        let reply = h.handle(Command::Get { key: 1 });
        assert_eq!(
            reply,
            "GET 1 -> \"apple\" (hit)\nstate (MRU -> LRU): [1:\"apple\"]"
        );
    }

    #[test]
    fn test_handle_get_miss_has_no_state_line() {
        let mut h = handler(2);
        assert_eq!(h.handle(Command::Get { key: 9 }), "GET 9 (miss)");
    }

    #[test]
    fn test_handle_update_reports_updated() {
        let mut h = handler(2);
        put(&mut h, 1, "a");
        let reply = put(&mut h, 1, "b");
        assert_eq!(
            reply,
            "PUT 1 -> \"b\" (updated)\nstate (MRU -> LRU): [1:\"b\"]"
        );
    }

    #[test]
    fn test_handle_eviction_reply() {
        let mut h = handler(2);
        put(&mut h, 1, "a");
        put(&mut h, 2, "b");
        let reply = put(&mut h, 3, "c");
        assert_eq!(
            reply,
            "cache full: evicted key 1 to admit key 3\n\
             PUT 3 -> \"c\" (added)\n\
             state (MRU -> LRU): [3:\"c\"] [2:\"b\"]"
        );
    }

    #[test]
    fn test_handle_get_reshapes_eviction_order() {
        let mut h = handler(2);
        put(&mut h, 1, "a");
        put(&mut h, 2, "b");
        h.handle(Command::Get { key: 1 });
        let reply = put(&mut h, 3, "c");
        assert!(reply.starts_with("cache full: evicted key 2 to admit key 3"));
    }

    #[test]
    fn test_handle_state_empty() {
        let mut h = handler(2);
        assert_eq!(h.handle(Command::State), "cache is empty");
    }

    #[test]
    fn test_handle_state_lists_mru_first() {
        let mut h = handler(3);
        put(&mut h, 1, "a");
        put(&mut h, 2, "b");
        put(&mut h, 3, "c");
        assert_eq!(
            h.handle(Command::State),
            "state (MRU -> LRU): [3:\"c\"] [2:\"b\"] [1:\"a\"]"
        );
    }

    #[test]
    fn test_handle_reset_keeps_counters() {
        let mut h = handler(2);
        put(&mut h, 1, "a");
        h.handle(Command::Get { key: 1 });
        let reply = h.handle(Command::Reset);
        assert_eq!(reply, "cache cleared\ncache is empty");
        let stats = h.handle(Command::Stats);
        assert!(stats.contains("hits: 1"));
        assert!(stats.contains("inserts: 1"));
    }

    #[test]
    fn test_handle_capacity_zero_is_error_and_keeps_entries() {
        let mut h = handler(2);
        put(&mut h, 1, "a");
        let reply = h.handle(Command::Capacity { capacity: 0 });
        assert_eq!(reply, "error: invalid capacity: 0 (must be at least 1)");
        assert_eq!(h.handle(Command::State), "state (MRU -> LRU): [1:\"a\"]");
    }

    #[test]
    fn test_handle_capacity_recreates_empty() {
        let mut h = handler(2);
        put(&mut h, 1, "a");
        let reply = h.handle(Command::Capacity { capacity: 5 });
        assert_eq!(reply, "capacity set to 5\ncache is empty");
        let stats = h.handle(Command::Stats);
        assert!(stats.contains("entries: 0/5"));
    }

    #[test]
    fn test_handle_stats_block() {
        let mut h = handler(2);
        put(&mut h, 1, "a");
        h.handle(Command::Get { key: 1 });
        h.handle(Command::Get { key: 2 });
        let stats = h.handle(Command::Stats);
        assert!(stats.contains("hits: 1"));
        assert!(stats.contains("misses: 1"));
        assert!(stats.contains("hit ratio: 50.00%"));
        assert!(stats.contains("entries: 1/2"));
    }

    #[test]
    fn test_handle_help_and_quit() {
        let mut h = handler(1);
        assert!(h.handle(Command::Help).contains("CAPACITY"));
        assert_eq!(h.handle(Command::Quit), "bye");
    }
}
