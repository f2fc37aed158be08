//! Patient mutations.

use tracing::info;

use super::{slip_number, EntityKind, IdPrefix, LabStore, StoreError, StoreResult};
use crate::models::{NewPatient, Patient};

impl LabStore {
    /// Register a patient, assigning its id and slip number.
    ///
    /// The slip number is derived from the current table length, so a delete
    /// followed by a registration can repeat an existing slip number.
    pub fn add_patient(&mut self, new: NewPatient) -> StoreResult<Patient> {
        let patient = self.commit("add_patient", |doc, ids| {
            let id = ids.next(IdPrefix::Patient);
            let slip_no = slip_number(doc.patients.len() + 1);
            let patient = new.into_patient(id, slip_no);
            doc.patients.push(patient.clone());
            Ok(patient)
        })?;

        info!(patient_id = %patient.id, slip_no = %patient.slip_no, "Patient registered");
        Ok(patient)
    }

    /// Replace the patient with the same id. Returns `false` (and changes
    /// nothing) when no such patient exists.
    pub fn update_patient(&mut self, patient: Patient) -> StoreResult<bool> {
        if self.document.patient(&patient.id).is_none() {
            return Ok(false);
        }

        let id = patient.id.clone();
        self.commit("update_patient", |doc, _| {
            if let Some(slot) = doc.patients.iter_mut().find(|p| p.id == patient.id) {
                *slot = patient;
            }
            Ok(())
        })?;

        info!(patient_id = %id, "Patient updated");
        Ok(true)
    }

    /// Delete a patient no report or invoice refers to.
    pub fn delete_patient(&mut self, id: &str) -> StoreResult<bool> {
        let removed = self.commit("delete_patient", |doc, _| {
            let reports = doc.reports_referencing_patient(id);
            let invoices = doc.invoices_referencing_patient(id);
            if reports > 0 || invoices > 0 {
                return Err(StoreError::ReferentialIntegrity {
                    entity: EntityKind::Patient,
                    id: id.to_string(),
                    reports,
                    invoices,
                });
            }

            let before = doc.patients.len();
            doc.patients.retain(|p| p.id != id);
            Ok(doc.patients.len() < before)
        })?;

        if removed {
            info!(patient_id = id, "Patient deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewReport, Sex, Title};

    fn setup_store() -> LabStore {
        LabStore::open_in_memory().unwrap()
    }

    fn jane() -> NewPatient {
        let mut new = NewPatient::new(Title::Mrs, "Jane Doe", 34, Sex::Female);
        new.mobile = "9876543210".into();
        new
    }

    #[test]
    fn test_add_assigns_id_and_slip() {
        let mut store = setup_store();

        let first = store.add_patient(jane()).unwrap();
        let second = store
            .add_patient(NewPatient::new(Title::Mr, "Ravi Kumar", 45, Sex::Male))
            .unwrap();

        assert!(first.id.starts_with('p'));
        assert_ne!(first.id, second.id);
        assert_eq!(first.slip_no, "SN0001");
        assert_eq!(second.slip_no, "SN0002");
        assert_eq!(store.document().patients.len(), 2);
    }

    #[test]
    fn test_update_patient() {
        let mut store = setup_store();
        let mut patient = store.add_patient(jane()).unwrap();

        patient.address = "12 MG Road".into();
        assert!(store.update_patient(patient.clone()).unwrap());
        assert_eq!(store.document().patient(&patient.id), Some(&patient));
    }

    #[test]
    fn test_update_unknown_is_silent_noop() {
        let mut store = setup_store();
        store.add_patient(jane()).unwrap();
        let before = store.document().clone();

        let ghost = Patient {
            id: "p0".into(),
            ..Default::default()
        };
        assert!(!store.update_patient(ghost).unwrap());
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_delete_unreferenced() {
        let mut store = setup_store();
        let patient = store.add_patient(jane()).unwrap();

        assert!(store.delete_patient(&patient.id).unwrap());
        assert!(store.document().patients.is_empty());
        assert!(!store.delete_patient(&patient.id).unwrap());
    }

    #[test]
    fn test_delete_blocked_by_report() {
        let mut store = setup_store();
        let patient = store.add_patient(jane()).unwrap();
        store.add_report(NewReport::pending(&patient.id, "t1")).unwrap();
        let before = store.document().clone();

        let err = store.delete_patient(&patient.id).unwrap_err();
        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity {
                entity: EntityKind::Patient,
                reports: 1,
                invoices: 0,
                ..
            }
        ));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_slip_number_repeats_after_delete() {
        let mut store = setup_store();
        let first = store.add_patient(jane()).unwrap();
        let second = store.add_patient(jane()).unwrap();
        store.delete_patient(&first.id).unwrap();

        let third = store.add_patient(jane()).unwrap();
        assert_eq!(third.slip_no, second.slip_no);
        assert_ne!(third.id, second.id);
    }
}
