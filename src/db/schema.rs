pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS searcher_exploit (
    id INTEGER PRIMARY KEY,
    file TEXT NOT NULL,
    description TEXT NOT NULL,
    date TEXT NOT NULL,
    author TEXT NOT NULL DEFAULT '',
    type TEXT NOT NULL DEFAULT '',
    platform TEXT NOT NULL DEFAULT '',
    port INTEGER CHECK (port IS NULL OR (port >= 0 AND port <= 65535))
);

CREATE TABLE IF NOT EXISTS searcher_shellcode (
    id INTEGER PRIMARY KEY,
    file TEXT NOT NULL,
    description TEXT NOT NULL,
    date TEXT NOT NULL,
    author TEXT NOT NULL DEFAULT '',
    type TEXT NOT NULL DEFAULT '',
    platform TEXT NOT NULL DEFAULT '',
    port INTEGER CHECK (port IS NULL OR (port >= 0 AND port <= 65535))
);

CREATE TABLE IF NOT EXISTS searcher_suggestion (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    searched TEXT NOT NULL UNIQUE COLLATE NOCASE,
    suggestion TEXT NOT NULL,
    autoreplacement INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_exploit_date ON searcher_exploit(date DESC, id);
CREATE INDEX IF NOT EXISTS idx_shellcode_date ON searcher_shellcode(date DESC, id);
";
