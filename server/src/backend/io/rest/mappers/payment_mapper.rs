use shared::{Payment as PaymentDto, SavePaymentRequest};

use crate::backend::domain::commands::payment::SavePaymentCommand;
use crate::backend::domain::models::payment::Payment;

pub struct PaymentMapper;

impl PaymentMapper {
    pub fn to_dto(domain: Payment) -> PaymentDto {
        PaymentDto::from(domain)
    }

    pub fn to_dto_list(payments: Vec<Payment>) -> Vec<PaymentDto> {
        payments.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_command(request: SavePaymentRequest) -> SavePaymentCommand {
        SavePaymentCommand {
            date: request.date,
            amount: request.amount.map(|v| v.as_text()).unwrap_or_default(),
            method: request.method,
            note: request.note,
        }
    }
}
