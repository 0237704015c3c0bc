//! Built-in fallback phrase table
//!
//! When the live backend is unreachable or answers garbage, the service
//! degrades to this static English→Urdu table, and to the untranslated
//! input for phrases the table does not know. The built-in pairs cover the
//! textbook's recurring headings and labels; embedders can supply their own
//! table via [`FallbackTable::from_pairs`].

use std::collections::HashMap;

/// Known source phrases and their pre-translated Urdu equivalents.
const BUILTIN_PHRASES: &[(&str, &str)] = &[
    ("Chapter 1: Introduction to ROS 2", "باب 1: ROS 2 کا تعارف"),
    ("What is ROS 2?", "ROS 2 کیا ہے؟"),
    ("Key Features of ROS 2", "ROS 2 کی کلیدی خصوصیات"),
    ("Why ROS 2 for Physical AI?", "فزیکل AI کے لیے ROS 2 کیوں؟"),
    ("ROS 2 Architecture", "ROS 2 آرکیٹیکچر"),
    ("The DDS Layer", "DDS لیئر"),
    ("Getting Started with ROS 2", "ROS 2 کے ساتھ شروعات"),
    ("Installation", "تنصیب"),
    ("Basic Commands", "بنیادی کمانڈز"),
    ("ROS 2 vs. ROS 1", "ROS 2 بمقابلہ ROS 1"),
    ("Next Steps", "اگلے اقدامات"),
    ("Summary", "خلاصہ"),
    ("In this chapter, you learned:", "اس باب میں آپ نے سیکھا:"),
    ("Distributed computing", "تقسیم شدہ کمپیوٹنگ"),
    ("Language independence", "زبان کی آزادی"),
    ("Platform independence", "پلیٹ فارم کی آزادی"),
    ("Package management", "پیکیج مینجمنٹ"),
    ("Real-time capabilities", "ریل ٹائم صلاحیتیں"),
    ("Publisher/Subscriber model", "پبلشر/سبسکرائبر ماڈل"),
    ("Request/Reply model", "ریکویسٹ/ریپلائی ماڈل"),
    ("Discovery", "ڈسکوری"),
    ("Quality of Service (QoS) settings", "سروس کے معیار (QoS) کی ترتیبات"),
    ("Source the ROS 2 environment", "ROS 2 ماحول کو سورس کریں"),
    ("List all active nodes", "تمام فعال نوڈس کی فہرست"),
    ("List all active topics", "تمام فعال ٹاپکس کی فہرست"),
    ("List all active services", "تمام فعال سروسز کی فہرست"),
    ("Real-time support", "ریل ٹائم سپورٹ"),
    ("Multi-robot systems", "ملٹی روبوٹ سسٹم"),
    ("Security", "سیکورٹی"),
    ("DDS-based communication", "DDS-مبنی مواصلات"),
    ("OS platform support", "OS پلیٹ فارم سپورٹ"),
    ("Continue to", "جاری رکھیں"),
    ("Chapter 2: ROS 2 Nodes and Topics", "باب 2: ROS 2 نوڈس اور ٹاپکس"),
];

/// Static source-phrase → translation lookup
///
/// Lookup is exact-string-match: two texts differing by whitespace are
/// distinct keys. The content corpus is static per page, so exact matching
/// suffices; this is a documented limitation, not a bug.
#[derive(Debug, Clone)]
pub struct FallbackTable {
    entries: HashMap<String, String>,
}

impl FallbackTable {
    /// The compiled-in textbook table.
    pub fn builtin() -> Self {
        Self::from_pairs(
            BUILTIN_PHRASES
                .iter()
                .map(|(en, ur)| ((*en).to_string(), (*ur).to_string())),
        )
    }

    /// An empty table: unknown phrases always resolve to themselves.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.entries.get(text).map(String::as_str)
    }

    /// Best-effort resolution: the table's translation, else the input.
    pub fn resolve(&self, text: &str) -> String {
        self.lookup(text).unwrap_or(text).to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::builtin()
    }
}
