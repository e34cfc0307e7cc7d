// ==========================================
// VisaFor/Heru - 线索仓储（SQLite）
// ==========================================
// 职责: 管理 lead 表，作为导入流程的持久化 Sink
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{Lead, LeadSource, LeadStatus, TeamMember};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::lead_sink::LeadSink;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

pub struct LeadRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LeadRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保表存在（如果不存在则创建）
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS lead (
              seq INTEGER PRIMARY KEY AUTOINCREMENT,
              lead_id TEXT NOT NULL UNIQUE,
              name TEXT NOT NULL,
              company TEXT NOT NULL,
              email TEXT NOT NULL,
              phone TEXT NOT NULL DEFAULT '',
              status TEXT NOT NULL,
              source TEXT NOT NULL,
              owner_name TEXT NOT NULL,
              owner_avatar TEXT NOT NULL DEFAULT '',
              last_contacted TEXT NOT NULL,
              created_date TEXT NOT NULL,
              avatar TEXT NOT NULL DEFAULT ''
            );

            CREATE INDEX IF NOT EXISTS idx_lead_email ON lead(email);
            CREATE INDEX IF NOT EXISTS idx_lead_status ON lead(status);
            "#,
        )?;
        Ok(())
    }

    /// 写入一条线索
    pub fn insert(&self, lead: &Lead) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO lead (
                lead_id, name, company, email, phone, status, source,
                owner_name, owner_avatar, last_contacted, created_date, avatar
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                lead.id,
                lead.name,
                lead.company,
                lead.email,
                lead.phone,
                lead.status.to_string(),
                lead.source.to_string(),
                lead.owner.name,
                lead.owner.avatar,
                lead.last_contacted,
                lead.created_date,
                lead.avatar,
            ],
        )?;
        Ok(())
    }

    /// 查询全部线索（按写入顺序）
    pub fn list_leads(&self) -> RepositoryResult<Vec<Lead>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT lead_id, name, company, email, phone, status, source,
                   owner_name, owner_avatar, last_contacted, created_date, avatar
            FROM lead
            ORDER BY seq ASC
            "#,
        )?;

        let rows = stmt.query_map([], map_lead_row)?;

        let mut leads = Vec::new();
        for row in rows {
            leads.push(row?.into_lead()?);
        }
        Ok(leads)
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, lead_id: &str) -> RepositoryResult<Lead> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT lead_id, name, company, email, phone, status, source,
                       owner_name, owner_avatar, last_contacted, created_date, avatar
                FROM lead
                WHERE lead_id = ?1
                "#,
                params![lead_id],
                map_lead_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                    entity: "Lead".to_string(),
                    id: lead_id.to_string(),
                },
                other => other.into(),
            })?;
        row.into_lead()
    }

    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM lead", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[async_trait]
impl LeadSink for LeadRepository {
    async fn append_lead(&self, lead: Lead) -> RepositoryResult<()> {
        self.insert(&lead)
    }
}

// ==========================================
// 行映射
// ==========================================

/// lead 表原始行（状态/来源仍为文本）
struct LeadRow {
    id: String,
    name: String,
    company: String,
    email: String,
    phone: String,
    status: String,
    source: String,
    owner_name: String,
    owner_avatar: String,
    last_contacted: DateTime<Utc>,
    created_date: DateTime<Utc>,
    avatar: String,
}

fn map_lead_row(row: &Row<'_>) -> rusqlite::Result<LeadRow> {
    Ok(LeadRow {
        id: row.get(0)?,
        name: row.get(1)?,
        company: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        status: row.get(5)?,
        source: row.get(6)?,
        owner_name: row.get(7)?,
        owner_avatar: row.get(8)?,
        last_contacted: row.get(9)?,
        created_date: row.get(10)?,
        avatar: row.get(11)?,
    })
}

impl LeadRow {
    fn into_lead(self) -> RepositoryResult<Lead> {
        let status = LeadStatus::from_str_loose(&self.status).ok_or_else(|| {
            RepositoryError::FieldValueError {
                field: "status".to_string(),
                message: format!("未知线索状态: {}", self.status),
            }
        })?;
        let source = LeadSource::from_str_loose(&self.source).ok_or_else(|| {
            RepositoryError::FieldValueError {
                field: "source".to_string(),
                message: format!("未知线索来源: {}", self.source),
            }
        })?;

        Ok(Lead {
            id: self.id,
            name: self.name,
            company: self.company,
            email: self.email,
            phone: self.phone,
            status,
            source,
            owner: TeamMember::new(self.owner_name, self.owner_avatar),
            last_contacted: self.last_contacted,
            created_date: self.created_date,
            avatar: self.avatar,
        })
    }
}
