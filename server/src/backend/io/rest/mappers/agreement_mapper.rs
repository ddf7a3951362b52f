use shared::{
    Agreement as AgreementDto, AgreementRow, AgreementTerms as AgreementTermsDto,
    FormattedAgreement, SaveAgreementRequest,
};

use crate::backend::domain::agreement_calculator::AgreementTerms;
use crate::backend::domain::commands::agreement::SaveAgreementCommand;
use crate::backend::domain::date_utils::format_date;
use crate::backend::domain::formatting::{format_duration, format_money};
use crate::backend::domain::models::agreement::Agreement;
use crate::backend::domain::service_catalog::ServiceCatalog;

pub struct AgreementMapper;

impl AgreementMapper {
    pub fn to_dto(domain: Agreement) -> AgreementDto {
        AgreementDto::from(domain)
    }

    pub fn to_terms_dto(terms: &AgreementTerms) -> AgreementTermsDto {
        AgreementTermsDto {
            rate_per_month: terms.rate_per_month,
            rate_per_year: terms.rate_per_year,
            end_date: format_date(terms.end_date),
            duration: terms.duration_months,
            budget_per_month: terms.budget_per_month,
            invoice_per_month: terms.invoice_per_month(),
        }
    }

    /// Agreement plus the display strings shown in the agreements grid.
    /// Service codes missing from the catalog are shown as the bare code.
    pub fn to_row(domain: Agreement, catalog: &ServiceCatalog) -> AgreementRow {
        let terms = domain.terms();
        let services = domain
            .service_codes
            .iter()
            .map(|code| {
                catalog
                    .get(code)
                    .map(|entry| entry.label.clone())
                    .unwrap_or_else(|| code.clone())
            })
            .collect();

        let formatted = FormattedAgreement {
            rate_per_month: format_money(terms.rate_per_month),
            rate_per_year: format_money(terms.rate_per_year),
            budget_per_month: format_money(terms.budget_per_month),
            invoice_per_month: format_money(terms.invoice_per_month()),
            duration: format_duration(terms.duration_months),
            services,
        };

        AgreementRow {
            agreement: Self::to_dto(domain),
            formatted,
        }
    }

    pub fn to_rows(agreements: Vec<Agreement>, catalog: &ServiceCatalog) -> Vec<AgreementRow> {
        agreements
            .into_iter()
            .map(|agreement| Self::to_row(agreement, catalog))
            .collect()
    }

    pub fn to_command(request: SaveAgreementRequest) -> SaveAgreementCommand {
        SaveAgreementCommand {
            service_codes: request.service_code,
            start_date: request.start_date,
            duration: request.duration.map(|v| v.as_text()),
            budget_per_month: request.budget_per_month.map(|v| v.as_text()),
        }
    }
}
