//! Member management for administrators

use chrono::NaiveDate;

use crate::{
    api::ApiClient,
    error::{ClientError, ClientResult},
    forms::UserForm,
    models::{Loan, Page, User},
    table::Pager,
};

/// Member detail with one page of their loan history
#[derive(Debug, Clone)]
pub struct UserDetail {
    pub user: User,
    pub loans: Page<Loan>,
    pub pager: Pager,
}

#[derive(Clone)]
pub struct UserAdminService {
    client: ApiClient,
    page_size: u32,
    window: u32,
}

impl UserAdminService {
    pub fn new(client: ApiClient, page_size: u32, window: u32) -> Self {
        Self {
            client,
            page_size,
            window,
        }
    }

    pub async fn list(&self) -> ClientResult<Vec<User>> {
        self.client.list_users().await
    }

    /// Create a member, or update `editing` when set
    pub async fn save(&self, form: &UserForm, editing: Option<i64>) -> ClientResult<()> {
        let payload = form.to_payload()?;
        match editing {
            Some(id) => {
                self.client.update_user(id, &payload).await?;
                tracing::info!(id, "user updated");
            }
            None => {
                self.client.create_user(&payload).await?;
                tracing::info!(name = %payload.name, "user created");
            }
        }
        Ok(())
    }

    /// Update only the given fields, keeping the rest from the server copy
    pub async fn edit(
        &self,
        id: i64,
        name: Option<String>,
        phone: Option<String>,
        memo: Option<String>,
    ) -> ClientResult<()> {
        let current = self.client.get_user(id).await?;
        let mut form = UserForm::from_user(&current);
        if let Some(name) = name {
            form.name = name;
        }
        if let Some(phone) = phone {
            form.phone = phone;
        }
        if let Some(memo) = memo {
            form.memo = memo;
        }
        self.save(&form, Some(id)).await
    }

    pub async fn delete(&self, id: i64, confirmed: bool) -> ClientResult<()> {
        if !confirmed {
            return Err(ClientError::NotConfirmed(format!(
                "deleting user {} needs confirmation",
                id
            )));
        }
        self.client.delete_user(id).await?;
        tracing::info!(id, "user deleted");
        Ok(())
    }

    /// Member profile plus loan history as of `today`.
    ///
    /// The history endpoint is not paginated, so pages are cut locally.
    pub async fn detail(&self, id: i64, page: u32, today: NaiveDate) -> ClientResult<UserDetail> {
        let (user, loans) = tokio::try_join!(self.client.get_user(id), self.client.loans_by_user(id))?;

        let loans: Vec<Loan> = loans
            .into_iter()
            .map(|loan| loan.with_effective_status(today))
            .collect();
        let loans = Page::from_slice(&loans, page, self.page_size);
        let pager = Pager::new(loans.page, self.window);

        Ok(UserDetail { user, loans, pager })
    }
}
