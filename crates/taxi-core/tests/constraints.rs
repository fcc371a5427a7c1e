//! Integration tests for the constraint pipeline.
//!
//! Constraints are built as declarations arrive and validated once the
//! whole document is linked:
//! Declare → Build → Link → Validate → Report

use taxi_core::compile::{
    DocumentBuilder, FieldDecl, ObjectTypeDecl, OperationDecl, ParameterDecl, ServiceDecl,
};
use taxi_core::constraints::{ComparisonValue, ConstraintExpr, LegacySubject, PropertyRef};
use taxi_core::error::{DiagnosticFormatter, ErrorKind};
use taxi_core::expression::Operator;
use taxi_core::foundation::{QualifiedName, SourceMap, Span, Value};
use taxi_core::model::{FieldExtension, ObjectTypeExtension, PrimitiveType, TypeRef};
use taxi_core::registry::TypeExtension;

fn qn(name: &str) -> QualifiedName {
    QualifiedName::parse(name)
}

fn money(builder: &mut DocumentBuilder) -> TypeRef {
    let money = builder.resolve_type(&qn("Money"), Span::unknown());
    builder.declare_object_type(ObjectTypeDecl::new(
        "Money",
        vec![
            FieldDecl::new("amount", PrimitiveType::Decimal.into()),
            FieldDecl::new("currency", PrimitiveType::String.into()),
        ],
    ));
    money
}

fn this_field_equals(field: &str, value: ComparisonValue) -> ConstraintExpr {
    ConstraintExpr::PropertyComparison {
        property: PropertyRef::ThisField(format!("this.{}", field).as_str().into()),
        operator: Operator::Equal,
        value,
        location: Span::unknown(),
    }
}

fn gbp() -> ComparisonValue {
    ComparisonValue::Literal(Value::string("GBP"))
}

// ============================================================================
// Property-to-parameter constraints
// ============================================================================

#[test]
fn test_known_field_validates() {
    let mut builder = DocumentBuilder::new();
    let money = money(&mut builder);
    builder.declare_service(ServiceDecl::new(
        "FxService",
        vec![OperationDecl::new(
            "convert",
            vec![ParameterDecl::new("source", money.clone())
                .with_constraint(this_field_equals("currency", gbp()))],
            money,
        )
        .with_contract(this_field_equals(
            "currency",
            ComparisonValue::Path("source.currency".into()),
        ))],
    ));

    let compiled = builder.finish().unwrap();
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_unknown_field_is_malformed() {
    let mut builder = DocumentBuilder::new();
    let money = money(&mut builder);
    builder.declare_service(ServiceDecl::new(
        "FxService",
        vec![OperationDecl::new(
            "convert",
            vec![ParameterDecl::new("source", money.clone())
                .with_constraint(this_field_equals("ccy", gbp()))],
            money,
        )],
    ));

    let errors = builder.finish().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::MalformedConstraint);
    assert!(errors[0].message.contains("ccy"));
    assert!(errors[0].message.contains("param source type Money"));
}

#[test]
fn test_relative_value_must_name_a_parameter() {
    let mut builder = DocumentBuilder::new();
    let money = money(&mut builder);
    builder.declare_service(ServiceDecl::new(
        "FxService",
        vec![OperationDecl::new(
            "convert",
            vec![ParameterDecl::new("source", money.clone())],
            money,
        )
        .with_contract(this_field_equals(
            "currency",
            ComparisonValue::Path("target.currency".into()),
        ))],
    ));

    let errors = builder.finish().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0]
        .message
        .contains("operation convert does not declare a parameter named target"));
}

#[test]
fn test_constraint_by_type() {
    let mut builder = DocumentBuilder::new();
    let currency = builder.resolve_type(&qn("Currency"), Span::unknown());
    builder.declare_object_type(ObjectTypeDecl::new(
        "Currency",
        vec![FieldDecl::new("code", PrimitiveType::String.into())],
    ));
    let price = builder.resolve_type(&qn("Price"), Span::unknown());
    builder.declare_object_type(ObjectTypeDecl::new(
        "Price",
        vec![
            FieldDecl::new("amount", PrimitiveType::Decimal.into()),
            FieldDecl::new("currency", currency),
        ],
    ));
    builder.declare_service(ServiceDecl::new(
        "Pricing",
        vec![OperationDecl::new(
            "quote",
            vec![ParameterDecl::new("price", price.clone()).with_constraint(
                ConstraintExpr::PropertyComparison {
                    property: PropertyRef::TypeName(qn("Currency")),
                    operator: Operator::Equal,
                    value: gbp(),
                    location: Span::unknown(),
                },
            )],
            price,
        )],
    ));

    assert!(builder.finish().is_ok());
}

/// `this.currency.code` only exists once an extension refines `currency`
/// from `String` to `Iso`. The contract and the extension both come first.
fn nested_contract_builder(refine: bool) -> DocumentBuilder {
    let mut builder = DocumentBuilder::new();
    let money = builder.resolve_type(&qn("Money"), Span::unknown());
    let iso = builder.resolve_type(&qn("Iso"), Span::unknown());
    builder.declare_service(ServiceDecl::new(
        "FxService",
        vec![OperationDecl::new(
            "convert",
            vec![ParameterDecl::new("source", money.clone())],
            money.clone(),
        )
        .with_contract(this_field_equals("currency.code", gbp()))],
    ));
    if refine {
        builder.extend_type(
            qn("Money"),
            TypeExtension::Object(
                ObjectTypeExtension::new().with_field(FieldExtension::new("currency").refined_to(iso)),
            ),
        );
    }
    builder.declare_object_type(ObjectTypeDecl::new(
        "Money",
        vec![
            FieldDecl::new("amount", PrimitiveType::Decimal.into()),
            FieldDecl::new("currency", PrimitiveType::String.into()),
        ],
    ));
    builder.declare_object_type(ObjectTypeDecl::new(
        "Iso",
        vec![FieldDecl::new("code", PrimitiveType::String.into())],
    ));
    builder
}

#[test]
fn test_nested_path_valid_after_refinement() {
    let compiled = nested_contract_builder(true).finish().unwrap();
    assert!(compiled.diagnostics.is_empty());
    let currency = compiled.document.field(&qn("Money"), "currency").unwrap();
    assert_eq!(compiled.document.type_name(&currency.type_ref), qn("Iso"));
}

#[test]
fn test_nested_path_invalid_without_refinement() {
    let errors = nested_contract_builder(false).finish().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::MalformedConstraint);
    assert!(errors[0].message.contains("is not an object type"));
}

// ============================================================================
// Legacy and derived constraints
// ============================================================================

#[test]
fn test_legacy_constant_on_field() {
    let mut builder = DocumentBuilder::new();
    let money = money(&mut builder);
    builder.declare_object_type(ObjectTypeDecl::new(
        "Trade",
        vec![
            FieldDecl::new("price", money.clone()).with_constraint(ConstraintExpr::LegacyConstant {
                subject: LegacySubject::FieldName("currency".to_string()),
                value: Value::string("GBP"),
                location: Span::unknown(),
            }),
            FieldDecl::new("fee", money).with_constraint(ConstraintExpr::LegacyConstant {
                subject: LegacySubject::FieldName("ccy".to_string()),
                value: Value::string("GBP"),
                location: Span::unknown(),
            }),
        ],
    ));

    let errors = builder.finish().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("field fee"));
}

#[test]
fn test_derived_value_only_on_contracts() {
    let mut builder = DocumentBuilder::new();
    let money = money(&mut builder);
    let derived = ConstraintExpr::DerivedFrom {
        path: "source.amount".into(),
        location: Span::unknown(),
    };
    builder.declare_service(ServiceDecl::new(
        "FxService",
        vec![OperationDecl::new(
            "convert",
            vec![ParameterDecl::new("source", money.clone()).with_constraint(derived.clone())],
            money,
        )
        .with_contract(derived)],
    ));

    let errors = builder.finish().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("return contract"));
}

// ============================================================================
// Unresolved types and rendering
// ============================================================================

#[test]
fn test_unresolved_type_is_reported_at_reference() {
    let mut sources = SourceMap::new();
    let source = "type Order {\n  id : Zorp\n}\n";
    let file_id = sources.add_file("orders.taxi", source.to_string());

    let mut builder = DocumentBuilder::new();
    let zorp = builder.resolve_type(&qn("Zorp"), Span::new(file_id, 20, 24, 2));
    builder.declare_object_type(ObjectTypeDecl::new("Order", vec![FieldDecl::new("id", zorp)]));

    let errors = builder.finish().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::UnresolvedType);
    assert!(errors[0].message.contains("Zorp"));

    let rendered = DiagnosticFormatter::new(&sources).format(&errors[0]);
    assert!(rendered.contains("orders.taxi:2:8"));
    assert!(rendered.contains("id : Zorp"));
}

#[test]
fn test_imported_targets_are_not_checked() {
    let mut builder = DocumentBuilder::new();
    builder.add_import(qn("ref.Money"));
    let money = builder.resolve_type(&qn("ref.Money"), Span::unknown());
    assert!(matches!(money, TypeRef::UnresolvedImport(_)));
    builder.declare_object_type(ObjectTypeDecl::new(
        "Trade",
        vec![FieldDecl::new("price", money).with_constraint(this_field_equals("ccy", gbp()))],
    ));

    assert!(builder.finish().is_ok());
}
