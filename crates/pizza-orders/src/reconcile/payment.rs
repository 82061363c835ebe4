//! Payment assembly.
//!
//! Converts a stored credential record into a payment instruction, or
//! fails naming the first missing required field. Fields are checked in a
//! fixed order so the reported field is stable: card type, number,
//! expiration, security code, postal code.

use crate::credentials::CredentialRecord;
use crate::ordering::{Payment, PaymentKind};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("credential is missing required field {0}")]
    MissingField(&'static str),
}

/// Build a payment instruction from a credential record. The amount is
/// left at zero; the caller attaches the validated price.
pub fn assemble_payment(record: &CredentialRecord) -> Result<Payment, PaymentError> {
    let card_type = require(&record.card_type, "CardType")?;
    let number = require(&record.number, "Number")?;
    let expiration = require(&record.expiration, "Expiration")?;
    let security_code = require(&record.security_code, "SecurityCode")?;
    let postal_code = require(&record.postal_code, "PostalCode")?;

    Ok(Payment {
        kind: PaymentKind::CreditCard,
        card_type: card_type.to_uppercase(),
        number: number.to_string(),
        expiration: expiration.to_string(),
        security_code: security_code.to_string(),
        postal_code: postal_code.to_string(),
        amount: 0.0,
    })
}

fn require<'a>(
    field: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, PaymentError> {
    field.as_deref().ok_or(PaymentError::MissingField(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CredentialRecord {
        CredentialRecord {
            card_type: Some("visa".to_string()),
            number: Some("4100123422343234".to_string()),
            expiration: Some("0525".to_string()),
            security_code: Some("123".to_string()),
            postal_code: Some("62704".to_string()),
        }
    }

    #[test]
    fn test_complete_record_assembles_credit_card_payment() {
        let payment = assemble_payment(&record()).unwrap();
        assert_eq!(payment.kind, PaymentKind::CreditCard);
        assert_eq!(payment.card_type, "VISA");
        assert_eq!(payment.number, "4100123422343234");
        assert_eq!(payment.amount, 0.0);
    }

    #[test]
    fn test_missing_security_code_is_named() {
        let mut r = record();
        r.security_code = None;
        assert_eq!(
            assemble_payment(&r).unwrap_err(),
            PaymentError::MissingField("SecurityCode")
        );
    }

    #[test]
    fn test_fields_are_checked_in_fixed_order() {
        // Everything missing: the first field in the fixed order is the
        // one reported.
        let empty = CredentialRecord::default();
        assert_eq!(
            assemble_payment(&empty).unwrap_err(),
            PaymentError::MissingField("CardType")
        );

        // Card type present: the next missing field is reported.
        let mut r = CredentialRecord::default();
        r.card_type = Some("visa".to_string());
        assert_eq!(
            assemble_payment(&r).unwrap_err(),
            PaymentError::MissingField("Number")
        );
    }
}
