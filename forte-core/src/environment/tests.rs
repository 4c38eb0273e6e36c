use super::prelude::*;

#[test]
fn symbols_compare_by_identity() {
    let first = VariableSymbol::new(SymbolId(0), "x", false, ValueType::Integer);
    let second = VariableSymbol::new(SymbolId(1), "x", false, ValueType::Integer);

    assert_ne!(first, second, "Same name in different declarations must differ");
    assert_eq!(first, first.clone());
}

#[test]
fn store_keeps_shadowed_variables_apart() {
    let outer = VariableSymbol::new(SymbolId(0), "x", true, ValueType::Integer);
    let inner = VariableSymbol::new(SymbolId(1), "x", true, ValueType::Boolean);

    let mut environment = Environment::new();
    environment.set(outer.clone(), Value::from(10));
    environment.set(inner.clone(), TRUE);

    assert_eq!(environment.len(), 2);
    assert_eq!(environment.get(&outer), Some(&Value::Integer { value: 10 }));
    assert_eq!(environment.get(&inner), Some(&TRUE));
}

#[test]
fn forget_from_keeps_older_symbols() {
    let older = VariableSymbol::new(SymbolId(0), "x", false, ValueType::Integer);
    let newer = VariableSymbol::new(SymbolId(1), "y", false, ValueType::Integer);

    let mut environment = Environment::new();
    environment.set(older.clone(), Value::from(1));
    environment.set(newer.clone(), Value::from(2));
    environment.forget_from(SymbolId(1));

    assert_eq!(environment.get(&older), Some(&Value::Integer { value: 1 }));
    assert_eq!(environment.get(&newer), None);
    assert_eq!(environment.len(), 1);
}

#[test]
fn value_accessors_report_type_faults() {
    assert_eq!(Value::from(3).as_integer(), Ok(3));
    assert_eq!(FALSE.as_boolean(), Ok(false));

    let error = ZERO.as_boolean().unwrap_err();
    assert!(error.is_internal());
    assert_eq!(error.to_string(), "expected a value of type Boolean, found Integer");
}
