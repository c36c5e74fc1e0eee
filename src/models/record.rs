use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Typed access to the fields every catalog entry carries.
///
/// Exploits and shellcodes are stored in separate collections with their own
/// vocabularies, but search and filtering only ever need these accessors.
pub trait Vulnerability {
    fn id(&self) -> i64;
    fn description(&self) -> &str;
    /// Path of the source artifact, relative to the artifacts root.
    fn file(&self) -> &str;
    fn author(&self) -> &str;
    fn vuln_type(&self) -> &str;
    fn platform(&self) -> &str;
    fn port(&self) -> Option<u16>;
    fn date(&self) -> NaiveDate;
}

/// A published exploit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exploit {
    pub id: i64,
    pub file: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "type", default)]
    pub vuln_type: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub port: Option<u16>,
}

/// A shellcode entry. The port is never displayed for shellcodes but is still
/// available for filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shellcode {
    pub id: i64,
    pub file: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "type", default)]
    pub vuln_type: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub port: Option<u16>,
}

macro_rules! impl_vulnerability {
    ($ty:ty) => {
        impl Vulnerability for $ty {
            fn id(&self) -> i64 {
                self.id
            }
            fn description(&self) -> &str {
                &self.description
            }
            fn file(&self) -> &str {
                &self.file
            }
            fn author(&self) -> &str {
                &self.author
            }
            fn vuln_type(&self) -> &str {
                &self.vuln_type
            }
            fn platform(&self) -> &str {
                &self.platform
            }
            fn port(&self) -> Option<u16> {
                self.port
            }
            fn date(&self) -> NaiveDate {
                self.date
            }
        }
    };
}

impl_vulnerability!(Exploit);
impl_vulnerability!(Shellcode);

/// Either kind of catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Exploit(Exploit),
    Shellcode(Shellcode),
}

impl Record {
    fn inner(&self) -> &dyn Vulnerability {
        match self {
            Record::Exploit(e) => e,
            Record::Shellcode(s) => s,
        }
    }

    pub fn collection(&self) -> super::Collection {
        match self {
            Record::Exploit(_) => super::Collection::Exploits,
            Record::Shellcode(_) => super::Collection::Shellcodes,
        }
    }
}

impl Vulnerability for Record {
    fn id(&self) -> i64 {
        self.inner().id()
    }
    fn description(&self) -> &str {
        self.inner().description()
    }
    fn file(&self) -> &str {
        self.inner().file()
    }
    fn author(&self) -> &str {
        self.inner().author()
    }
    fn vuln_type(&self) -> &str {
        self.inner().vuln_type()
    }
    fn platform(&self) -> &str {
        self.inner().platform()
    }
    fn port(&self) -> Option<u16> {
        self.inner().port()
    }
    fn date(&self) -> NaiveDate {
        self.inner().date()
    }
}

impl From<Exploit> for Record {
    fn from(e: Exploit) -> Self {
        Record::Exploit(e)
    }
}

impl From<Shellcode> for Record {
    fn from(s: Shellcode) -> Self {
        Record::Shellcode(s)
    }
}
