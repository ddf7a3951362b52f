use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::backend::domain::date_utils::{format_date, parse_date};

/// A business the company bills
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub address: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub email: String,
    pub phone: String,
    pub cell: String,
    pub contact: String,
    pub due_monthly: Decimal,
    pub last_payment_date: Option<NaiveDate>,
}

impl Client {
    pub fn generate_id() -> String {
        format!("client-{}", uuid::Uuid::new_v4())
    }
}

/// An unreadable last payment date is treated as missing
impl From<shared::Client> for Client {
    fn from(record: shared::Client) -> Self {
        Self {
            id: record.id,
            name: record.name,
            address: record.address,
            address2: record.address2,
            city: record.city,
            state: record.state,
            zip: record.zip,
            email: record.email,
            phone: record.phone,
            cell: record.cell,
            contact: record.contact,
            due_monthly: record.due_monthly,
            last_payment_date: parse_date(&record.last_payment_date),
        }
    }
}

impl From<Client> for shared::Client {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            address: client.address,
            address2: client.address2,
            city: client.city,
            state: client.state,
            zip: client.zip,
            email: client.email,
            phone: client.phone,
            cell: client.cell,
            contact: client.contact,
            due_monthly: client.due_monthly,
            last_payment_date: format_date(client.last_payment_date),
        }
    }
}
