//! SQL DDL for initializing the database schema.
//! SQLite-first design; string lists are stored as JSON-encoded TEXT.

/// SQLite schema includes:
/// - `projects` table (portfolio projects, bilingual copy)
/// - `experiences` table (work history, parallel achievement arrays)
/// - `contact_messages` table (contact-form submissions, read flag)
/// - `documentation` table (articles keyed by unique slug)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Portfolio projects
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY NOT NULL,
    status_text TEXT NOT NULL,
    status_color TEXT NOT NULL,
    image TEXT NOT NULL,
    title_en TEXT NOT NULL,
    title_pt TEXT NOT NULL,
    short_desc_en TEXT NOT NULL,
    short_desc_pt TEXT NOT NULL,
    full_desc_en TEXT NOT NULL DEFAULT '',
    full_desc_pt TEXT NOT NULL DEFAULT '',
    features_en TEXT NOT NULL DEFAULT '[]', -- JSON array
    features_pt TEXT NOT NULL DEFAULT '[]', -- JSON array
    tech TEXT NOT NULL DEFAULT '[]', -- JSON array
    link TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_projects_created ON projects(created_at DESC);

-- ---------------------------------------------------------------------------
-- Work experience (achievements kept as two parallel JSON arrays)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS experiences (
    id INTEGER PRIMARY KEY NOT NULL,
    logo TEXT NULL,
    company_en TEXT NOT NULL,
    company_pt TEXT NOT NULL,
    role_en TEXT NOT NULL,
    role_pt TEXT NOT NULL,
    period_en TEXT NOT NULL,
    period_pt TEXT NOT NULL,
    description_en TEXT NOT NULL,
    description_pt TEXT NOT NULL,
    tech TEXT NOT NULL DEFAULT '[]', -- JSON array
    achievements_en TEXT NOT NULL DEFAULT '[]', -- JSON array
    achievements_pt TEXT NOT NULL DEFAULT '[]', -- JSON array
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_experiences_created ON experiences(created_at DESC);

-- ---------------------------------------------------------------------------
-- Contact-form submissions
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS contact_messages (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    message TEXT NOT NULL,
    read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_messages_created ON contact_messages(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_messages_read ON contact_messages(read);

-- ---------------------------------------------------------------------------
-- Documentation articles
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS documentation (
    id INTEGER PRIMARY KEY NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    title_en TEXT NOT NULL,
    title_pt TEXT NOT NULL,
    content_en TEXT NOT NULL,
    content_pt TEXT NOT NULL,
    category TEXT NOT NULL,
    published INTEGER NOT NULL DEFAULT 0,
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_docs_category ON documentation(category);
CREATE INDEX IF NOT EXISTS idx_docs_published ON documentation(published);
CREATE INDEX IF NOT EXISTS idx_docs_order ON documentation(display_order, created_at DESC);
"#;
