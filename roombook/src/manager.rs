//! The reservation manager: CRUD plus the approval workflow.
//!
//! Rules are written against the [`ReservationStore`] contract. The
//! [`ReservationManager`] runs every mutating rule inside one IMMEDIATE
//! transaction, so the read-check-write sequence of `approve` is atomic with
//! respect to other writers on the same database file.

use crate::database::{Database, DatabaseConfig, ReservationStore};
use crate::error::{Error, Result};
use crate::reservation::{
    Reservation, ReservationId, ReservationRequest, ReservationStatus, RoomId, UserId,
};

/// Tunable rules applied by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerPolicy {
    /// Reject create/update payloads whose end date is not after the start.
    pub require_ordered_dates: bool,
    /// Allow deleting reservations that are already APPROVED.
    pub allow_delete_approved: bool,
}

impl Default for ManagerPolicy {
    fn default() -> Self {
        Self {
            require_ordered_dates: true,
            allow_delete_approved: true,
        }
    }
}

/// Entry point for all reservation operations.
///
/// The manager holds no state beyond its database handle; each process or
/// thread may open its own manager on the same file.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use roombook::{DatabaseConfig, ReservationManager, ReservationRequest};
///
/// let mut manager = ReservationManager::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let created = manager
///     .create(&ReservationRequest::new(1, 5, day(1), day(10)))
///     .unwrap();
/// let approved = manager.approve(created.id()).unwrap();
/// assert!(!approved.is_pending());
/// ```
#[derive(Debug)]
pub struct ReservationManager {
    db: Database,
    policy: ManagerPolicy,
}

impl ReservationManager {
    /// Wraps an open database with the given policy.
    #[must_use]
    pub const fn new(db: Database, policy: ManagerPolicy) -> Self {
        Self { db, policy }
    }

    /// Opens the database described by `config` with the default policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        Ok(Self::new(Database::open(config)?, ManagerPolicy::default()))
    }

    /// Returns the policy in effect.
    #[must_use]
    pub const fn policy(&self) -> ManagerPolicy {
        self.policy
    }

    /// Returns the underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Loads a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no reservation has this id.
    pub fn get_by_id(&self, id: ReservationId) -> Result<Reservation> {
        log::debug!("get reservation id={id}");
        get_existing(self.db.connection(), id)
    }

    /// Lists every reservation in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn list_all(&self) -> Result<Vec<Reservation>> {
        log::debug!("list all reservations");
        self.db.connection().find_all()
    }

    /// Creates a PENDING reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the payload carries an id or a
    /// status, or (under the default policy) if its dates are not ordered.
    pub fn create(&mut self, request: &ReservationRequest) -> Result<Reservation> {
        log::debug!("create reservation {:?}", request.details);
        let policy = self.policy;
        let created = self
            .db
            .with_transaction(|tx| create_in(&**tx, policy, request))?;
        log::info!(
            "created reservation {} for room {}",
            created.id(),
            created.room_id()
        );
        Ok(created)
    }

    /// Replaces the details of a PENDING reservation.
    ///
    /// The payload's `id` and `status` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, [`Error::InvalidStatus`]
    /// if the reservation is not PENDING, or [`Error::InvalidArgument`] for
    /// unordered dates under the default policy.
    pub fn update(
        &mut self,
        id: ReservationId,
        request: &ReservationRequest,
    ) -> Result<Reservation> {
        log::debug!("update reservation id={id} with {:?}", request.details);
        let policy = self.policy;
        let updated = self
            .db
            .with_transaction(|tx| update_in(&**tx, policy, id, request))?;
        log::info!("updated reservation {id}");
        Ok(updated)
    }

    /// Deletes a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or
    /// [`Error::InvalidStatus`] when the policy forbids deleting an APPROVED
    /// reservation.
    pub fn delete(&mut self, id: ReservationId) -> Result<()> {
        log::debug!("delete reservation id={id}");
        let policy = self.policy;
        self.db.with_transaction(|tx| delete_in(&**tx, policy, id))?;
        log::info!("deleted reservation {id}");
        Ok(())
    }

    /// Approves a PENDING reservation after checking for conflicts.
    ///
    /// The conflict query and the status write share one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, [`Error::InvalidStatus`]
    /// if the reservation is not PENDING, or [`Error::ReservationConflict`]
    /// if an APPROVED reservation in the same room overlaps it.
    pub fn approve(&mut self, id: ReservationId) -> Result<Reservation> {
        log::debug!("approve reservation id={id}");
        let approved = self.db.with_transaction(|tx| approve_in(&**tx, id))?;
        log::info!(
            "approved reservation {id} in room {}",
            approved.room_id()
        );
        Ok(approved)
    }

    /// Lists reservations requested by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn find_by_user(&self, user_id: UserId) -> Result<Vec<Reservation>> {
        log::debug!("find reservations for user {user_id}");
        self.db.connection().find_by_user_id(user_id)
    }

    /// Lists reservations for a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Reservation>> {
        log::debug!("find reservations for room {room_id}");
        self.db.connection().find_by_room_id(room_id)
    }

    /// Lists reservations in a status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>> {
        log::debug!("find reservations with status {status}");
        self.db.connection().find_by_status(status)
    }
}

fn get_existing<S: ReservationStore + ?Sized>(store: &S, id: ReservationId) -> Result<Reservation> {
    store
        .find_by_id(id)?
        .ok_or_else(|| Error::reservation_not_found(id))
}

fn check_dates(policy: ManagerPolicy, request: &ReservationRequest) -> Result<()> {
    if policy.require_ordered_dates {
        request.details.check_date_order()?;
    }
    Ok(())
}

fn create_in<S: ReservationStore + ?Sized>(
    store: &S,
    policy: ManagerPolicy,
    request: &ReservationRequest,
) -> Result<Reservation> {
    if let Some(id) = request.id {
        return Err(Error::InvalidArgument {
            message: format!("id should be empty on create (got {id})"),
        });
    }
    if let Some(status) = request.status {
        return Err(Error::InvalidArgument {
            message: format!("status should be empty on create (got {status})"),
        });
    }
    check_dates(policy, request)?;

    store.save(None, &request.details, ReservationStatus::Pending)
}

fn update_in<S: ReservationStore + ?Sized>(
    store: &S,
    policy: ManagerPolicy,
    id: ReservationId,
    request: &ReservationRequest,
) -> Result<Reservation> {
    let existing = get_existing(store, id)?;
    if !existing.is_pending() {
        return Err(Error::InvalidStatus {
            id,
            status: existing.status(),
            operation: "modify",
        });
    }
    check_dates(policy, request)?;

    store.save(Some(id), &request.details, existing.status())
}

fn delete_in<S: ReservationStore + ?Sized>(
    store: &S,
    policy: ManagerPolicy,
    id: ReservationId,
) -> Result<()> {
    if !policy.allow_delete_approved {
        let existing = get_existing(store, id)?;
        if !existing.is_pending() {
            return Err(Error::InvalidStatus {
                id,
                status: existing.status(),
                operation: "delete",
            });
        }
    } else if !store.exists_by_id(id)? {
        return Err(Error::reservation_not_found(id));
    }

    store.delete_by_id(id)?;
    Ok(())
}

fn approve_in<S: ReservationStore + ?Sized>(store: &S, id: ReservationId) -> Result<Reservation> {
    let existing = get_existing(store, id)?;
    if !existing.is_pending() {
        return Err(Error::InvalidStatus {
            id,
            status: existing.status(),
            operation: "approve",
        });
    }

    let conflicting = store.find_conflicting(
        existing.room_id(),
        existing.start_date(),
        existing.end_date(),
        Some(id),
    )?;
    if !conflicting.is_empty() {
        let conflicting: Vec<ReservationId> = conflicting.iter().map(Reservation::id).collect();
        log::warn!("reservation {id} conflicts with approved reservation(s) {conflicting:?}");
        return Err(Error::ReservationConflict {
            id,
            room_id: existing.room_id(),
            conflicting,
        });
    }

    store.save(Some(id), existing.details(), ReservationStatus::Approved)
}
