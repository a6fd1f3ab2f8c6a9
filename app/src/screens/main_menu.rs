//! Profile card, category table, and the add/edit/delete/logout actions.
//!
//! Opening the menu needs a stored session; without one the caller is sent
//! back to sign in. The category list and the profile each get their own
//! `FetchList`. Mutations are single requests that, on success, explicitly
//! refresh the category list. A failed mutation leaves the list as it was.

use std::fmt;

use category_core::{
    ApiError, Category, CategoryClient, CategoryForm, CategoryId, FetchList, FetchSnapshot,
    HttpTransport, Profile, Resolution, Session, SessionContext, SessionError, SessionStore,
    UpdateCategory,
};

use crate::notice::Notice;
use crate::screens::Route;

pub struct MainMenu<'a, T: ?Sized> {
    client: &'a CategoryClient,
    transport: &'a T,
    session: Session,
    categories: FetchList<Vec<Category>>,
    profile: FetchList<Profile>,
}

impl<'a, T: HttpTransport + ?Sized> MainMenu<'a, T> {
    /// Bind the menu to the stored session. Nothing is fetched yet.
    pub fn open<S: SessionStore>(
        client: &'a CategoryClient,
        transport: &'a T,
        session: &SessionContext<S>,
    ) -> Result<Self, Route> {
        let session = match session.require() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "no usable session, redirecting to sign in");
                return Err(Route::SignIn);
            }
        };
        Ok(Self {
            categories: FetchList::new(client.build_list_categories(&session)),
            profile: FetchList::new(client.build_profile(&session)),
            client,
            transport,
            session,
        })
    }

    /// Fetch the category list and the profile once each.
    pub fn load(&mut self) {
        self.categories.refresh(self.transport);
        self.profile.refresh(self.transport);
    }

    pub fn refresh_categories(&mut self) -> Resolution {
        self.categories.refresh(self.transport)
    }

    pub fn categories(&self) -> FetchSnapshot<'_, Vec<Category>> {
        self.categories.snapshot()
    }

    pub fn profile(&self) -> FetchSnapshot<'_, Profile> {
        self.profile.snapshot()
    }

    pub fn add_category(&mut self, form: &CategoryForm) -> Notice {
        let result = form
            .validate()
            .map_err(ApiError::from)
            .and_then(|input| {
                let request = self.client.build_create_category(&self.session, &input)?;
                let response = self.transport.execute(&request)?;
                self.client.parse_create_category(response)
            });
        self.finish("add category", result.map(drop), Notice::add_success, Notice::add_failed)
    }

    pub fn update_category(&mut self, id: CategoryId, form: &CategoryForm) -> Notice {
        let result = form
            .validate()
            .map_err(ApiError::from)
            .and_then(|input| {
                let update = UpdateCategory {
                    id,
                    name: input.name,
                    is_active: input.is_active,
                };
                let request = self.client.build_update_category(&self.session, &update)?;
                let response = self.transport.execute(&request)?;
                self.client.parse_update_category(response)
            });
        self.finish(
            "update category",
            result.map(drop),
            Notice::update_success,
            Notice::update_failed,
        )
    }

    pub fn delete_category(&mut self, id: &CategoryId) -> Notice {
        let result = self
            .client
            .build_delete_category(&self.session, id)
            .and_then(|request| self.transport.execute(&request).map_err(ApiError::from))
            .and_then(|response| self.client.parse_delete_category(response));
        self.finish(
            "delete category",
            result,
            Notice::delete_success,
            Notice::delete_failed,
        )
    }

    /// Map a mutation result to its notice; refresh the list on success.
    fn finish(
        &mut self,
        action: &str,
        result: Result<(), ApiError>,
        success: fn() -> Notice,
        failure: fn() -> Notice,
    ) -> Notice {
        match result {
            Ok(()) => {
                tracing::info!(action, "request succeeded");
                self.refresh_categories();
                success()
            }
            Err(ApiError::Validation(errors)) => Notice::invalid_input(&errors),
            Err(err) => {
                tracing::error!(action, error = %err, "request failed");
                failure()
            }
        }
    }
}

/// Drop the stored session and go back to sign in.
pub fn logout<S: SessionStore>(session: &mut SessionContext<S>) -> Result<Route, SessionError> {
    session.sign_out()?;
    tracing::info!("signed out");
    Ok(Route::SignIn)
}

impl<T: ?Sized> fmt::Display for MainMenu<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categories = self.categories.snapshot();
        if categories.loading {
            return write!(f, "Loading...");
        }
        if categories.error {
            return write!(f, "Error while fetching data...");
        }

        let profile = self.profile.snapshot().data;
        let name = profile.map(|p| p.name.as_str()).unwrap_or_default();
        let email = profile.map(|p| p.email.as_str()).unwrap_or_default();
        writeln!(f, "Hello, {name}!")?;
        writeln!(f)?;
        writeln!(f, "Profile Data")?;
        writeln!(f, "  Name: {name}")?;
        writeln!(f, "  Email: {email}")?;
        writeln!(f)?;
        writeln!(f, "List of Category")?;

        match categories.data {
            Some(rows) if !rows.is_empty() => write_table(f, rows),
            _ => write!(f, "No data available."),
        }
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, rows: &[Category]) -> fmt::Result {
    let ids: Vec<String> = rows.iter().map(|c| c.id.to_string()).collect();
    let id_width = ids.iter().map(String::len).max().unwrap_or(0).max("ID".len());
    let name_width = rows
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    writeln!(f, "{:<id_width$}  {:<name_width$}  Status", "ID", "Name")?;
    for (i, (id, row)) in ids.iter().zip(rows).enumerate() {
        write!(f, "{id:<id_width$}  {:<name_width$}  {}", row.name, row.status_label())?;
        if i + 1 < rows.len() {
            writeln!(f)?;
        }
    }
    Ok(())
}
