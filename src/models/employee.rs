//! Employee model.
//!
//! The roster is owned by the surrounding ERP; the engine only reads the
//! fields it needs to resolve a policy and prorate salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee as supplied by the roster.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", Decimal::new(22000, 0), "acme");
/// assert_eq!(employee.company_id, "acme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// The company the employee is assigned to.
    pub company_id: String,
}

impl Employee {
    /// Creates a roster entry.
    pub fn new(
        id: impl Into<String>,
        base_salary: Decimal,
        company_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            base_salary,
            company_id: company_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "emp_001",
            "base_salary": "22000",
            "company_id": "acme"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.base_salary, Decimal::new(22000, 0));
        assert_eq!(employee.company_id, "acme");
    }

    #[test]
    fn test_deserialize_employee_numeric_salary() {
        let json = r#"{"id": "emp_002", "base_salary": 1500.50, "company_id": "acme"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.base_salary, Decimal::new(150050, 2));
    }
}
