use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;

use super::{get_db_conn, DbPool};
use crate::models::appointments::{
    Appointment, AppointmentFields, NewAppointment, ReplaceAppointment, APPOINTMENT_COLUMNS,
};

no_arg_sql_function!(last_insert_rowid, diesel::sql_types::Integer);

/// Persistence gateway for appointments.
///
/// Every method is a blocking call that issues one logical statement against
/// the store. Callers are expected to run it off the async executor.
pub trait AppointmentStore: Send + Sync {
    /// All appointments in insertion order.
    fn list(&self) -> anyhow::Result<Vec<Appointment>>;

    fn get(&self, id: i32) -> anyhow::Result<Option<Appointment>>;

    /// Persists a new appointment and returns it as stored.
    fn create(&self, fields: AppointmentFields) -> anyhow::Result<Appointment>;

    /// Replaces every mutable field of `id`. `None` means no row matched.
    fn update(&self, id: i32, fields: AppointmentFields) -> anyhow::Result<Option<Appointment>>;

    /// Returns the number of rows removed.
    fn delete(&self, id: i32) -> anyhow::Result<usize>;
}

pub struct DieselStore {
    pool: DbPool,
    default_state: String,
}

impl DieselStore {
    pub fn new<S: Into<String>>(pool: DbPool, default_state: S) -> Self {
        Self {
            pool,
            default_state: default_state.into(),
        }
    }
}

impl AppointmentStore for DieselStore {
    fn list(&self) -> anyhow::Result<Vec<Appointment>> {
        use crate::schema::appointments;

        let conn = get_db_conn(&self.pool)?;
        appointments::table
            .select(APPOINTMENT_COLUMNS)
            .order(appointments::id.asc())
            .load::<Appointment>(&conn)
            .context("DB error")
    }

    fn get(&self, id: i32) -> anyhow::Result<Option<Appointment>> {
        use crate::schema::appointments;

        let conn = get_db_conn(&self.pool)?;
        appointments::table
            .find(id)
            .select(APPOINTMENT_COLUMNS)
            .get_result::<Appointment>(&conn)
            .optional()
            .context("DB error")
    }

    fn create(&self, fields: AppointmentFields) -> anyhow::Result<Appointment> {
        use crate::schema::appointments;

        let data = NewAppointment::new(fields, Utc::now().naive_utc(), &self.default_state);
        let conn = get_db_conn(&self.pool)?;
        conn.transaction(|| {
            diesel::insert_into(appointments::table)
                .values(&data)
                .execute(&conn)
                .context("DB error")?;

            let id = diesel::select(last_insert_rowid)
                .get_result::<i32>(&conn)
                .context("DB error")?;

            appointments::table
                .find(id)
                .select(APPOINTMENT_COLUMNS)
                .get_result::<Appointment>(&conn)
                .context("DB error")
        })
    }

    fn update(&self, id: i32, fields: AppointmentFields) -> anyhow::Result<Option<Appointment>> {
        use crate::schema::appointments;

        let data = ReplaceAppointment::from(fields);
        let conn = get_db_conn(&self.pool)?;
        conn.transaction(|| {
            let res = diesel::update(appointments::table.find(id))
                .set(&data)
                .execute(&conn)
                .context("DB error")?;
            if res == 0 {
                return Ok(None);
            }

            appointments::table
                .find(id)
                .select(APPOINTMENT_COLUMNS)
                .get_result::<Appointment>(&conn)
                .optional()
                .context("DB error")
        })
    }

    fn delete(&self, id: i32) -> anyhow::Result<usize> {
        use crate::schema::appointments;

        let conn = get_db_conn(&self.pool)?;
        diesel::delete(appointments::table.find(id))
            .execute(&conn)
            .context("DB error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{database::in_memory_pool, models::appointments::APPOINT_STATE_PENDING};

    fn fields(name: &str) -> AppointmentFields {
        AppointmentFields {
            full_name: name.to_string(),
            email: "john.doe@example.com".to_string(),
            phone_number: "123-456-7890".to_string(),
            vehicle_make: "Toyota".to_string(),
            vehicle_model: "Camry".to_string(),
            vehicle_year: 2022,
            service_type: "Oil Change".to_string(),
            preferred_date: "2024-02-28".to_string(),
            preferred_time: "10:00".to_string(),
            additional_notes: "Please check the brakes too".to_string(),
            appointment_state: None,
        }
    }

    fn store() -> DieselStore {
        DieselStore::new(in_memory_pool(), APPOINT_STATE_PENDING)
    }

    #[test]
    fn create_applies_default_state_and_assigns_id() {
        let store = store();
        let created = store.create(fields("John Doe")).unwrap();

        assert!(created.id > 0);
        assert_eq!(created.full_name, "John Doe");
        assert_eq!(created.appointment_state, APPOINT_STATE_PENDING);
        assert_eq!(store.get(created.id).unwrap(), Some(created));
    }

    #[test]
    fn create_keeps_explicit_state() {
        let store = store();
        let mut input = fields("Jane Roe");
        input.appointment_state = Some("Reserved".to_string());

        let created = store.create(input).unwrap();
        assert_eq!(created.appointment_state, "Reserved");
    }

    #[test]
    fn list_returns_rows_in_insertion_order() {
        let store = store();
        let names = ["A", "B", "C"];
        for name in names.iter() {
            store.create(fields(name)).unwrap();
        }

        let listed = store.list().unwrap();
        let listed_names: Vec<_> = listed.iter().map(|a| a.full_name.as_str()).collect();
        assert_eq!(listed_names, names);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = store();
        let first = store.create(fields("A")).unwrap();
        let second = store.create(fields("B")).unwrap();
        assert_eq!(store.delete(second.id).unwrap(), 1);

        let third = store.create(fields("C")).unwrap();
        assert!(first.id < second.id);
        assert!(second.id < third.id);
    }

    #[test]
    fn update_replaces_fields_and_preserves_creation_date() {
        let store = store();
        let created = store.create(fields("John Doe")).unwrap();

        let replacement = AppointmentFields {
            full_name: "Enrique Ruiz".to_string(),
            additional_notes: String::new(),
            appointment_state: None,
            ..fields("ignored")
        };
        let updated = store.update(created.id, replacement).unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.creation_date, created.creation_date);
        assert_eq!(updated.full_name, "Enrique Ruiz");
        assert_eq!(updated.additional_notes, "");
        assert_eq!(updated.appointment_state, "");
    }

    #[test]
    fn update_and_delete_of_missing_row_match_nothing() {
        let store = store();
        assert_eq!(store.update(42, fields("Nobody")).unwrap(), None);
        assert_eq!(store.delete(42).unwrap(), 0);
        assert_eq!(store.get(42).unwrap(), None);
    }
}
