//! Test fixtures - reusable metadata documents and project layouts.

/// Source-format parent document of a decomposed object
pub const ACCOUNT_OBJECT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>Account</label>
</CustomObject>
"#;

/// Metadata-format object carrying two fields and a validation rule
pub const ACCOUNT_COMPOSED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>Account</label>
    <fields>
        <fullName>Name</fullName>
        <type>LongText</type>
    </fields>
    <fields>
        <fullName>Phone</fullName>
        <type>Phone</type>
    </fields>
    <validationRules>
        <fullName>Check</fullName>
        <active>true</active>
    </validationRules>
</CustomObject>
"#;

pub const APEX_META: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ApexClass xmlns="http://soap.sforce.com/2006/04/metadata">
    <apiVersion>62.0</apiVersion>
    <status>Active</status>
</ApexClass>
"#;

pub fn field(name: &str, kind: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<CustomField xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n    <fullName>{}</fullName>\n    <type>{}</type>\n</CustomField>\n",
        name, kind
    )
}

/// A small source-format package under `force-app`
pub fn source_project() -> Vec<(String, String)> {
    let base = "force-app/main/default";
    vec![
        (format!("{base}/classes/Greeter.cls"), "public class Greeter {}".to_string()),
        (format!("{base}/classes/Greeter.cls-meta.xml"), APEX_META.to_string()),
        (
            format!("{base}/objects/Account/Account.object-meta.xml"),
            ACCOUNT_OBJECT.to_string(),
        ),
        (
            format!("{base}/objects/Account/fields/Name.field-meta.xml"),
            field("Name", "Text"),
        ),
        (format!("{base}/lwc/hello/hello.js"), "export default class Hello {}".to_string()),
        (format!("{base}/lwc/hello/hello.html"), "<template></template>".to_string()),
        (
            format!("{base}/lwc/hello/hello.js-meta.xml"),
            "<LightningComponentBundle/>".to_string(),
        ),
    ]
}
