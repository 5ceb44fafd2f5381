use serde::Serialize;

/// How a binding tool would surface an item of the inspected type.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ApiKind {
    Constructor,
    Accessor,
    Mutator,
    MemberOperator,
    FreeOperator,
}

impl ApiKind {
    pub const ALL: [ApiKind; 5] = [
        ApiKind::Constructor,
        ApiKind::Accessor,
        ApiKind::Mutator,
        ApiKind::MemberOperator,
        ApiKind::FreeOperator,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ApiKind::Constructor => "constructor",
            ApiKind::Accessor => "accessor",
            ApiKind::Mutator => "mutator",
            ApiKind::MemberOperator => "member operator",
            ApiKind::FreeOperator => "free operator",
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiRecord {
    pub id: String,
    pub kind: ApiKind,
    pub type_name: String,
    pub symbol: String,
    pub signature: String,
    pub doc_comment: String,
    /// Operator traits whose impls only forward to this free function
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sugar_for: Vec<String>,
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiShape {
    pub type_name: String,
    pub records: Vec<ApiRecord>,
}

impl ApiShape {
    pub fn count(&self, kind: ApiKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    pub fn of_kind(&self, kind: ApiKind) -> impl Iterator<Item = &ApiRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    pub fn summary(&self) -> Vec<(ApiKind, usize)> {
        ApiKind::ALL.iter().map(|k| (*k, self.count(*k))).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
