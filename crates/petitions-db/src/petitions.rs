use petitions_types::api::{PetitionSearch, SortBy, SortOrder};
use rusqlite::types::Value;

use crate::Database;
use crate::Result;
use crate::models::{PetitionRow, now_timestamp};

/// One page of a petition listing. `offset` and `limit` are already resolved
/// from the caller's page number and page size.
#[derive(Debug, Clone, Default)]
pub struct PetitionPage {
    pub search: Option<PetitionSearch>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub offset: i64,
    pub limit: i64,
}

impl Database {
    pub fn create_petition(&self, title: &str, description: &str) -> Result<PetitionRow> {
        let created_at = now_timestamp();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO petitions (title, description, votes_count, created_at) VALUES (?1, ?2, 0, ?3)",
                (title, description, &created_at),
            )?;

            Ok(PetitionRow {
                id: conn.last_insert_rowid(),
                title: title.to_string(),
                description: description.to_string(),
                votes_count: 0,
                created_at,
            })
        })
    }

    pub fn list_petitions(&self, page: &PetitionPage) -> Result<Vec<PetitionRow>> {
        let mut sql =
            String::from("SELECT id, title, description, votes_count, created_at FROM petitions");
        let mut params: Vec<Value> = Vec::with_capacity(3);

        match &page.search {
            Some(PetitionSearch::Id(id)) => {
                sql.push_str(" WHERE id = ?");
                params.push(Value::Integer(*id));
            }
            Some(PetitionSearch::Title(term)) => {
                sql.push_str(" WHERE instr(unicode_lower(title), ?) > 0");
                params.push(Value::Text(term.to_lowercase()));
            }
            None => {}
        }

        let column = match page.sort_by {
            SortBy::CreatedAt => "created_at",
            SortBy::VotesCount => "votes_count",
        };
        let direction = match page.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        // id breaks ties so pages never overlap
        sql.push_str(&format!(
            " ORDER BY {column} {direction}, id {direction} LIMIT ? OFFSET ?"
        ));
        params.push(Value::Integer(page.limit));
        params.push(Value::Integer(page.offset));

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(rusqlite::params_from_iter(params.iter()), PetitionRow::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

#[cfg(test)]
impl Database {
    pub fn get_petition(&self, id: i64) -> Result<Option<PetitionRow>> {
        use rusqlite::OptionalExtension;

        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, title, description, votes_count, created_at FROM petitions WHERE id = ?1",
                    [id],
                    PetitionRow::from_row,
                )
                .optional()?;
            Ok(row)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(db: &Database, titles: &[&str]) -> Vec<i64> {
        titles
            .iter()
            .map(|t| db.create_petition(t, "description").unwrap().id)
            .collect()
    }

    fn page(search: Option<PetitionSearch>, sort_by: SortBy, sort_order: SortOrder) -> PetitionPage {
        PetitionPage {
            search,
            sort_by,
            sort_order,
            offset: 0,
            limit: 100,
        }
    }

    fn ids(rows: &[PetitionRow]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn new_petition_starts_with_zero_votes() {
        let db = Database::open_in_memory().unwrap();
        let row = db.create_petition("Fix the road", "Potholes everywhere").unwrap();
        assert_eq!(row.votes_count, 0);

        let stored = db.get_petition(row.id).unwrap().unwrap();
        assert_eq!(stored.title, "Fix the road");
        assert_eq!(stored.created_at, row.created_at);
        assert!(db.get_petition(row.id + 1).unwrap().is_none());
    }

    #[test]
    fn numeric_search_matches_id_regardless_of_title() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, &["alpha", "beta", "gamma", "delta"]);

        let rows = db
            .list_petitions(&page(Some(PetitionSearch::Id(3)), SortBy::CreatedAt, SortOrder::Desc))
            .unwrap();
        assert_eq!(ids(&rows), vec![3]);
        assert_eq!(rows[0].title, "gamma");

        let rows = db
            .list_petitions(&page(Some(PetitionSearch::Id(99)), SortBy::CreatedAt, SortOrder::Desc))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn title_search_is_case_insensitive_substring() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, &["Save the FOOtball pitch", "bar", "More food trucks", "f_o_o"]);

        let rows = db
            .list_petitions(&page(
                Some(PetitionSearch::Title("foo".to_string())),
                SortBy::CreatedAt,
                SortOrder::Asc,
            ))
            .unwrap();
        assert_eq!(ids(&rows), vec![1, 3]);
    }

    #[test]
    fn title_search_folds_non_ascii_case() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, &["Петиция о парке", "Straße sanieren", "другое"]);

        let rows = db
            .list_petitions(&page(
                Some(PetitionSearch::Title("ПЕТИЦИЯ".to_string())),
                SortBy::CreatedAt,
                SortOrder::Asc,
            ))
            .unwrap();
        assert_eq!(ids(&rows), vec![1]);

        let rows = db
            .list_petitions(&page(
                Some(PetitionSearch::Title("STRAẞE".to_string())),
                SortBy::CreatedAt,
                SortOrder::Asc,
            ))
            .unwrap();
        assert_eq!(ids(&rows), vec![2]);
    }

    #[test]
    fn sorts_by_votes_count_with_id_tiebreak() {
        let db = Database::open_in_memory().unwrap();
        let ids_seeded = seed(&db, &["a", "b", "c"]);
        let voter = db.create_user("voter", "hash").unwrap();
        let other = db.create_user("other", "hash").unwrap();
        db.cast_vote(voter.id, ids_seeded[1]).unwrap();
        db.cast_vote(other.id, ids_seeded[1]).unwrap();
        db.cast_vote(voter.id, ids_seeded[2]).unwrap();

        let desc = db
            .list_petitions(&page(None, SortBy::VotesCount, SortOrder::Desc))
            .unwrap();
        assert_eq!(ids(&desc), vec![2, 3, 1]);

        let asc = db
            .list_petitions(&page(None, SortBy::VotesCount, SortOrder::Asc))
            .unwrap();
        assert_eq!(ids(&asc), vec![1, 3, 2]);
    }

    #[test]
    fn second_page_holds_items_ten_through_nineteen() {
        let db = Database::open_in_memory().unwrap();
        let titles: Vec<String> = (0..25).map(|i| format!("petition {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        seed(&db, &refs);

        let all = db
            .list_petitions(&page(None, SortBy::CreatedAt, SortOrder::Asc))
            .unwrap();
        let second = db
            .list_petitions(&PetitionPage {
                offset: 10,
                limit: 10,
                ..page(None, SortBy::CreatedAt, SortOrder::Asc)
            })
            .unwrap();

        assert_eq!(ids(&second), ids(&all[10..20]));

        let last = db
            .list_petitions(&PetitionPage {
                offset: 20,
                limit: 10,
                ..page(None, SortBy::CreatedAt, SortOrder::Asc)
            })
            .unwrap();
        assert_eq!(last.len(), 5);
    }

    #[test]
    fn newest_first_by_default() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, &["first", "second", "third"]);

        let rows = db.list_petitions(&PetitionPage { limit: 10, ..Default::default() }).unwrap();
        assert_eq!(ids(&rows), vec![3, 2, 1]);
    }
}
