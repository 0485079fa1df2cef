use crate::snapshot_rules;
use crate::{
    Action, Condition, RuleDocument, RuleSpec, RuleTemplate, SkipReason, parse, parse_rules,
    serialize,
};
use insta::assert_json_snapshot;

const MIXED_RULES_CRLF: &str = "@RuleName = \"Pass through UPN\"\r\n\
@RuleTemplate = \"PassThroughClaims\"\r\n\
c:[Type == \"http://schemas.xmlsoap.org/ws/2005/05/identity/claims/upn\", Issuer == \"AD AUTHORITY\"] => issue(param = c);\r\n\
\r\n\
@RuleName = \"LDAP Email\"\r\n\
@RuleTemplate = \"LdapClaims\"\r\n\
c:[Type == \"http://schemas.microsoft.com/ws/2008/06/identity/claims/windowsaccountname\", Issuer == \"AD AUTHORITY\"] => issue(store = \"Active Directory\", types = (\"http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress\", \"http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name\"), query = \";mail,displayName;{0}\", param = c.Value);\r\n\
\r\n\
@RuleName = \"Permit everyone\"\r\n\
=> issue(Type = \"http://schemas.microsoft.com/authorization/claims/permit\", Value = \"true\");\r\n";

#[test]
fn test_scenario_templated_rule() {
    let doc = parse_rules(
        "@RuleName = \"R1\"\n@RuleTemplate = \"T1\"\nc:[Type == \"a\", Issuer == \"b\"] => issue(store = \"s\", types = (\"x\", \"y\"));\n",
    );
    assert_eq!(doc.len(), 1);
    assert_eq!(doc[0].name, "R1");
    assert_eq!(doc[0].template, RuleTemplate::Other("T1".to_string()));
    assert_eq!(doc[0].condition, Some(Condition::new("a", "b")));
    assert_eq!(
        doc[0].action,
        Some(Action::new().with_store("s").with_types(["x", "y"]))
    );
    assert_eq!(doc[0].body, None);
}

#[test]
fn test_scenario_block_without_template_is_custom() {
    let doc = parse_rules("@RuleName = \"R2\"\nc:[Type == \"z\"] => foo");
    assert_eq!(doc.len(), 1);
    assert_eq!(doc[0].template, RuleTemplate::CustomRule);
    assert_eq!(
        doc[0].body.as_deref(),
        Some("@RuleName = \"R2\"\nc:[Type == \"z\"] => foo")
    );
    assert_eq!(doc[0].condition, None);
    assert_eq!(doc[0].action, None);
}

#[test]
fn test_scenario_serialize_custom_rule() {
    let doc = RuleDocument::from(vec![RuleSpec::custom(
        "R3",
        "c:[Type == \"http://schemas.microsoft.com/ws/2008/06/identity/claims/groupsid\"] => issue(claim = c);",
    )]);
    assert_eq!(
        serialize(&doc).unwrap(),
        "@RuleName = \"R3\"\nc:[Type == \"http://schemas.microsoft.com/ws/2008/06/identity/claims/groupsid\"] => issue(claim = c);\n"
    );
}

#[test]
fn test_engine_export_parses() {
    let outcome = parse(MIXED_RULES_CRLF);
    assert!(outcome.is_clean(), "skipped: {:?}", outcome.skipped);
    assert_eq!(
        outcome.document.names(),
        vec!["Pass through UPN", "LDAP Email", "Permit everyone"]
    );

    let ldap = outcome.document.by_name("LDAP Email").unwrap();
    assert_eq!(ldap.template, RuleTemplate::LdapClaims);
    let action = ldap.action.as_ref().unwrap();
    assert_eq!(action.store.as_deref(), Some("Active Directory"));
    assert_eq!(action.types.as_ref().map(Vec::len), Some(2));
    // The comma inside the quoted query is not an argument separator.
    assert_eq!(action.query.as_deref(), Some(";mail,displayName;{0}"));
    assert_eq!(action.param.as_deref(), Some("c.Value"));

    let permit = outcome.document.by_name("Permit everyone").unwrap();
    assert!(permit.is_custom());
    assert!(permit.body.as_deref().unwrap().contains("authorization/claims/permit"));
}

#[test]
fn test_engine_export_json() {
    let doc = parse_rules(MIXED_RULES_CRLF);
    assert_json_snapshot!(doc[0], @r#"
    {
      "name": "Pass through UPN",
      "template": "PassThroughClaims",
      "condition": {
        "claim_type": "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/upn",
        "issuer": "AD AUTHORITY"
      },
      "action": {
        "param": "c"
      }
    }
    "#);
}

#[test]
fn test_engine_export_reserialized() {
    let doc = parse_rules(&MIXED_RULES_CRLF.replace("\r\n", "\n"));
    snapshot_rules!(doc, @r#"
    @RuleName = "Pass through UPN"
    @RuleTemplate = "PassThroughClaims"
    c:[Type == "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/upn", Issuer == "AD AUTHORITY"] => issue(param = c);

    @RuleName = "LDAP Email"
    @RuleTemplate = "LdapClaims"
    c:[Type == "http://schemas.microsoft.com/ws/2008/06/identity/claims/windowsaccountname", Issuer == "AD AUTHORITY"] => issue(store = "Active Directory", types = ("http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress", "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name"), query = ";mail,displayName;{0}", param = c.Value);

    @RuleName = "Permit everyone"
    => issue(Type = "http://schemas.microsoft.com/authorization/claims/permit", Value = "true");
    "#);
}

#[test]
fn test_partial_parse_keeps_going() {
    let text = "@RuleName = \"A\"\n@RuleTemplate = \"MapClaims\"\nc:[Type == \"a\"]\n=> issue(types = (\"x\"));\n\n@RuleName = \"B\"\n@RuleTemplate = \"MapClaims\"\nnot a statement\n";
    let outcome = parse(text);

    assert_eq!(outcome.document.len(), 2);
    assert_eq!(outcome.document[0].condition, None);
    assert_eq!(
        outcome.document[0].action,
        Some(Action::new().with_types(["x"]))
    );
    let reasons: Vec<(usize, usize, SkipReason)> = outcome
        .skipped
        .iter()
        .map(|s| (s.block, s.line, s.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (0, 3, SkipReason::IncompleteCondition),
            (1, 3, SkipReason::UnrecognizedLine),
        ]
    );
}
