//! Translation service with a bounded in-memory cache.
//!
//! Translation rides the same completion upstream as chat, with its own
//! credential. Results are cached per (source, target, text) triple in
//! a FIFO map capped at [`CACHE_CAP`] entries so a long-running server
//! cannot grow the cache without bound.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::gateway::{CompletionApi, GatewayError};
use crate::profile::Language;

/// Maximum number of cached translations.
pub const CACHE_CAP: usize = 512;

const TRANSLATOR_PROMPT: &str = "You are a professional translator. Translate the given text \
accurately while preserving medical terminology. Respond with the translation only, no \
explanations or quotes.";

/// FIFO-bounded translation cache. Oldest entry is evicted first; a
/// cache hit does not refresh recency.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
    cap: usize,
}

impl TranslationCache {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            cap,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, value: String) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, value);
            return;
        }
        if self.cap == 0 {
            return;
        }
        while self.entries.len() >= self.cap {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cache_key(text: &str, source: Language, target: Language) -> String {
    // unit separator keeps languages and text unambiguous in one string
    format!(
        "{:?}\u{1f}{:?}\u{1f}{text}",
        source, target
    )
}

/// Translation front-end: cache lookup, then one completion call.
pub struct Translator {
    api: Arc<dyn CompletionApi>,
    cache: Mutex<TranslationCache>,
}

impl Translator {
    pub fn new(api: Arc<dyn CompletionApi>) -> Self {
        Self {
            api,
            cache: Mutex::new(TranslationCache::with_capacity(CACHE_CAP)),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api.is_configured()
    }

    /// Translate `text` from `source` to `target`. Identical-language
    /// requests and empty input short-circuit without an upstream call.
    pub async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, GatewayError> {
        if source == target || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let key = cache_key(text, source, target);
        {
            // a poisoned cache only loses cached entries, recover it
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(hit) = cache.get(&key) {
                debug!(cached = cache.len(), "translation cache hit");
                return Ok(hit);
            }
        }

        let user = format!(
            "Translate the following text from {} to {}:\n\n{text}",
            source.display_name(),
            target.display_name()
        );
        let translated = self.api.complete(TRANSLATOR_PROMPT, &user).await?;
        let translated = translated.trim().to_string();

        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(key, translated.clone());
        Ok(translated)
    }

    pub fn invalidate_cache(&self) {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .invalidate_all();
    }

    #[cfg(test)]
    pub fn cached_entries(&self) -> usize {
        self.cache.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::completion::mock::MockCompletionApi;

    #[test]
    fn cache_evicts_oldest_at_cap() {
        let mut cache = TranslationCache::with_capacity(3);
        cache.insert("a".into(), "1".into());
        cache.insert("b".into(), "2".into());
        cache.insert("c".into(), "3".into());
        cache.insert("d".into(), "4".into());
        assert_eq!(cache.len(), 3);
        assert!(cache.get("a").is_none(), "oldest entry evicted");
        assert_eq!(cache.get("d").as_deref(), Some("4"));
    }

    #[test]
    fn reinsert_updates_without_growing() {
        let mut cache = TranslationCache::with_capacity(2);
        cache.insert("a".into(), "1".into());
        cache.insert("a".into(), "one".into());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").as_deref(), Some("one"));
    }

    #[test]
    fn invalidate_all_empties_cache() {
        let mut cache = TranslationCache::with_capacity(4);
        cache.insert("a".into(), "1".into());
        cache.invalidate_all();
        assert!(cache.is_empty());
        cache.insert("b".into(), "2".into());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn same_language_short_circuits() {
        let api = Arc::new(MockCompletionApi::replying("unused"));
        let translator = Translator::new(api.clone());
        let out = translator
            .translate("hello", Language::En, Language::En)
            .await
            .unwrap();
        assert_eq!(out, "hello");
        assert!(api.calls.lock().unwrap().is_empty(), "no upstream call");
        assert_eq!(translator.cached_entries(), 0);
    }

    #[tokio::test]
    async fn second_call_hits_cache() {
        let api = Arc::new(MockCompletionApi::replying("hola"));
        let translator = Translator::new(api.clone());

        let first = translator
            .translate("hello", Language::En, Language::Es)
            .await
            .unwrap();
        let second = translator
            .translate("hello", Language::En, Language::Es)
            .await
            .unwrap();

        assert_eq!(first, "hola");
        assert_eq!(second, "hola");
        assert_eq!(api.calls.lock().unwrap().len(), 1, "one upstream call");
    }

    #[tokio::test]
    async fn prompt_names_both_languages() {
        let api = Arc::new(MockCompletionApi::replying("bonjour"));
        let translator = Translator::new(api.clone());
        translator
            .translate("hello", Language::En, Language::Fr)
            .await
            .unwrap();

        let calls = api.calls.lock().unwrap();
        let (system, user) = &calls[0];
        assert!(system.contains("professional translator"));
        assert!(user.contains("from English to French"));
        assert!(user.ends_with("hello"));
    }

    #[tokio::test]
    async fn direction_is_part_of_the_key() {
        let api = Arc::new(MockCompletionApi::with_replies(vec![
            Ok("hola".into()),
            Ok("hello".into()),
        ]));
        let translator = Translator::new(api.clone());
        translator
            .translate("x", Language::En, Language::Es)
            .await
            .unwrap();
        translator
            .translate("x", Language::Es, Language::En)
            .await
            .unwrap();
        assert_eq!(api.calls.lock().unwrap().len(), 2);
        assert_eq!(translator.cached_entries(), 2);
    }
}
