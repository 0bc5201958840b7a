//! Sync dispatcher: the four-verb hook a model layer calls to persist models.
//!
//! [`sync`] maps a [`Method`] onto one [`Store`] operation and reports the
//! outcome through a success or error callback. The only outcome reported as
//! an error is an absent result, with the message [`RECORD_NOT_FOUND`].
//! Storage and model faults are returned to the caller as `Err` instead and
//! neither callback runs.

use crate::{
    error::{Result, RECORD_NOT_FOUND},
    store::assigned_id,
    Error, Model, Storage, Store,
};
use std::fmt;
use std::str::FromStr;

/// A sync verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Read,
    Create,
    Update,
    Delete,
}

impl Method {
    /// The verb's lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Read => "read",
            Method::Create => "create",
            Method::Update => "update",
            Method::Delete => "delete",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "read" => Ok(Method::Read),
            "create" => Ok(Method::Create),
            "update" => Ok(Method::Update),
            "delete" => Ok(Method::Delete),
            other => Err(Error::InvalidMethod(other.to_string())),
        }
    }
}

/// Anything that has a [`Store`] a model can be synced through.
///
/// Implemented by a store itself (a model attached directly to a store) and
/// by [`crate::Collection`] (a model reached through its collection).
pub trait HasStore {
    type Storage: Storage;

    /// The store backing this owner.
    fn local_storage(&mut self) -> &mut Store<Self::Storage>;
}

impl<S: Storage> HasStore for Store<S> {
    type Storage = S;

    fn local_storage(&mut self) -> &mut Store<S> {
        self
    }
}

/// The result handed to a success callback.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncResponse<'m, M> {
    /// The model after create, update or delete
    Model(&'m M),
    /// One stored body, from a read by id
    Record(String),
    /// Every stored body in index order, from a read without id
    Records(Vec<String>),
}

impl<M> SyncResponse<'_, M> {
    /// The stored bodies carried by a read, if any.
    pub fn into_bodies(self) -> Vec<String> {
        match self {
            SyncResponse::Model(_) => Vec::new(),
            SyncResponse::Record(body) => vec![body],
            SyncResponse::Records(bodies) => bodies,
        }
    }
}

/// Boxed error callback, receiving the failure message.
pub type ErrorCallback<'a> = Box<dyn FnOnce(&str) + 'a>;

/// Boxed success callback.
pub type SuccessCallback<'a, M> = Box<dyn FnOnce(SyncResponse<'_, M>) + 'a>;

/// Success and error callbacks for one sync call.
pub struct SyncOptions<'a, M> {
    success: SuccessCallback<'a, M>,
    error: Option<ErrorCallback<'a>>,
}

impl<'a, M> SyncOptions<'a, M> {
    /// Options with both callbacks.
    pub fn new<F, E>(success: F, error: E) -> Self
    where
        F: FnOnce(SyncResponse<'_, M>) + 'a,
        E: FnOnce(&str) + 'a,
    {
        Self {
            success: Box::new(success),
            error: Some(Box::new(error)),
        }
    }

    /// Options with only a success callback. A not-found result is logged
    /// and otherwise dropped.
    pub fn success<F>(success: F) -> Self
    where
        F: FnOnce(SyncResponse<'_, M>) + 'a,
    {
        Self {
            success: Box::new(success),
            error: None,
        }
    }

    /// Add or replace the error callback.
    pub fn on_error<E>(mut self, error: E) -> Self
    where
        E: FnOnce(&str) + 'a,
    {
        self.error = Some(Box::new(error));
        self
    }
}

impl<M> fmt::Debug for SyncOptions<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("error", &self.error.is_some())
            .finish_non_exhaustive()
    }
}

/// Run one verb against the owner's store without callbacks.
///
/// `Ok(None)` is the absent result (a read by id with nothing stored). An
/// empty collection read is `Ok(Some(Records(vec![])))`, not absent.
pub fn dispatch<'m, H, M>(
    method: Method,
    owner: &mut H,
    model: &'m mut M,
) -> Result<Option<SyncResponse<'m, M>>>
where
    H: HasStore + ?Sized,
    M: Model,
{
    let store = owner.local_storage();
    tracing::debug!(collection = %store.name(), method = %method, id = ?model.id(), "sync");

    let response: Option<SyncResponse<'m, M>> = match method {
        Method::Read => match assigned_id(&*model) {
            Some(id) => store.find_by_id(id)?.map(SyncResponse::Record),
            None => Some(SyncResponse::Records(store.find_all()?)),
        },
        Method::Create => Some(SyncResponse::Model(store.create(model)?)),
        Method::Update => Some(SyncResponse::Model(store.update(model)?)),
        Method::Delete => Some(SyncResponse::Model(store.destroy(model)?)),
    };
    Ok(response)
}

/// Run one verb and report through `options`.
///
/// Calls `success` with a present result and `error("Record not found")`
/// with an absent one. Faults are returned as `Err` and no callback runs.
pub fn sync<H, M>(
    method: Method,
    owner: &mut H,
    model: &mut M,
    options: SyncOptions<'_, M>,
) -> Result<()>
where
    H: HasStore + ?Sized,
    M: Model,
{
    let SyncOptions { success, error } = options;
    match dispatch(method, owner, model)? {
        Some(response) => success(response),
        None => match error {
            Some(error) => error(RECORD_NOT_FOUND),
            None => tracing::warn!(method = %method, "record not found and no error callback given"),
        },
    }
    Ok(())
}

/// Callback-pair form of [`sync`]: a bare success callback and a separate,
/// optional error callback.
pub fn legacy_sync<'a, H, M, F>(
    method: Method,
    owner: &mut H,
    model: &mut M,
    success: F,
    error: Option<ErrorCallback<'a>>,
) -> Result<()>
where
    H: HasStore + ?Sized,
    M: Model,
    F: FnOnce(SyncResponse<'_, M>) + 'a,
{
    let mut options = SyncOptions::success(success);
    if let Some(error) = error {
        options = options.on_error(error);
    }
    sync(method, owner, model, options)
}
