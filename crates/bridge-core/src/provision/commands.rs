//! Vectores de argumentos del CLI destino.
use crate::provision::request::ValidatedRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlindCommand<'a> {
    OrganizationList,
    DatasetCreate { organization: &'a str, name: &'a str, slug: &'a str },
    SchemaCreate { organization: &'a str, dataset: &'a str, name: &'a str, slug: &'a str, file: &'a str },
    RecordCreate { organization: &'a str, dataset: &'a str, schema: &'a str, file: &'a str },
}

impl<'a> BlindCommand<'a> {
    pub fn dataset_create(req: &'a ValidatedRequest, name: &'a str) -> Self {
        BlindCommand::DatasetCreate { organization: &req.organization,
                                      name,
                                      slug: &req.dataset_slug }
    }

    pub fn schema_create(req: &'a ValidatedRequest, file: &'a str) -> Self {
        BlindCommand::SchemaCreate { organization: &req.organization,
                                     dataset: &req.dataset_slug,
                                     name: &req.schema_name,
                                     slug: &req.schema_slug,
                                     file }
    }

    pub fn record_create(req: &'a ValidatedRequest, file: &'a str) -> Self {
        BlindCommand::RecordCreate { organization: &req.organization,
                                     dataset: &req.dataset_slug,
                                     schema: &req.schema_slug,
                                     file }
    }

    pub fn args(&self) -> Vec<String> {
        let parts: Vec<&str> = match *self {
            BlindCommand::OrganizationList => vec!["organization", "list"],
            BlindCommand::DatasetCreate { organization, name, slug } => {
                vec!["dataset", "create", "--organization", organization, "--name", name, "--slug", slug]
            }
            BlindCommand::SchemaCreate { organization,
                                         dataset,
                                         name,
                                         slug,
                                         file, } => vec!["schema",
                                                         "create",
                                                         "--organization",
                                                         organization,
                                                         "--dataset",
                                                         dataset,
                                                         "--name",
                                                         name,
                                                         "--slug",
                                                         slug,
                                                         "--file",
                                                         file],
            BlindCommand::RecordCreate { organization,
                                         dataset,
                                         schema,
                                         file, } => vec!["record",
                                                         "create",
                                                         "--organization",
                                                         organization,
                                                         "--dataset",
                                                         dataset,
                                                         "--schema",
                                                         schema,
                                                         "--file",
                                                         file],
        };
        parts.into_iter().map(str::to_string).collect()
    }
}
