// Logical project fields and their resolution against a sheet's header row.
use std::collections::HashMap;

use crate::error::LedgerError;

/// How a header cell is matched against a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Trimmed, case-insensitive equality.
    Exact(&'static str),
    /// Trimmed, case-insensitive substring. The committed-value column has
    /// been titled "Observaciones", "Observaciones Ejecutadas" and so on.
    Contains(&'static str),
}

impl HeaderMatch {
    pub fn matches(self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        match self {
            HeaderMatch::Exact(name) => header == name,
            HeaderMatch::Contains(fragment) => header.contains(fragment),
        }
    }

    pub fn describe(self) -> String {
        match self {
            HeaderMatch::Exact(name) => name.to_string(),
            HeaderMatch::Contains(fragment) => format!("*{}*", fragment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    ProjectId,
    Name,
    Purpose,
    AuthorizedValue,
    Observations,
    CostCenterCode,
    CostCenterName,
    PepElement,
    PospreCode,
    PospreName,
    DaneCode,
    DaneName,
    AtlasLine,
    FundCode,
    FundName,
    MgaActivityCode,
    MgaActivityName,
    ManagingCenterCode,
    ManagingCenterName,
}

impl ProjectField {
    pub const ALL: [ProjectField; 19] = [
        ProjectField::ProjectId,
        ProjectField::Name,
        ProjectField::Purpose,
        ProjectField::AuthorizedValue,
        ProjectField::Observations,
        ProjectField::CostCenterCode,
        ProjectField::CostCenterName,
        ProjectField::PepElement,
        ProjectField::PospreCode,
        ProjectField::PospreName,
        ProjectField::DaneCode,
        ProjectField::DaneName,
        ProjectField::AtlasLine,
        ProjectField::FundCode,
        ProjectField::FundName,
        ProjectField::MgaActivityCode,
        ProjectField::MgaActivityName,
        ProjectField::ManagingCenterCode,
        ProjectField::ManagingCenterName,
    ];

    pub fn header(self) -> HeaderMatch {
        use HeaderMatch::{Contains, Exact};
        match self {
            ProjectField::ProjectId => Exact("codigo_bpin_proyecto"),
            ProjectField::Name => Exact("nombre_del_proyecto"),
            ProjectField::Purpose => Exact("objeto"),
            ProjectField::AuthorizedValue => Exact("valor"),
            ProjectField::Observations => Contains("observ"),
            ProjectField::CostCenterCode => Exact("codigo_del_centro_de_costos"),
            ProjectField::CostCenterName => Exact("nombre_del_centro_de_costos"),
            ProjectField::PepElement => Exact("elemento_pep_proyecto"),
            ProjectField::PospreCode => Exact("codigo_pospre"),
            ProjectField::PospreName => Exact("nombre_pospre"),
            ProjectField::DaneCode => Exact("codigo_dane"),
            ProjectField::DaneName => Exact("nombre_codigo_dane"),
            ProjectField::AtlasLine => Exact("rubro_atlas"),
            ProjectField::FundCode => Exact("codigo_del_fondo"),
            ProjectField::FundName => Exact("nombre_del_fondo"),
            ProjectField::MgaActivityCode => Exact("codigo_actividad_mga"),
            ProjectField::MgaActivityName => Exact("nombre_actividad_mga"),
            ProjectField::ManagingCenterCode => Exact("codigo_centro_gestor"),
            ProjectField::ManagingCenterName => Exact("nombre_centro_gestor"),
        }
    }
}

/// Column index of every field present in a header row.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: HashMap<ProjectField, usize>,
}

impl ColumnMap {
    /// Resolves all known fields, leftmost header first. Fails with a
    /// NotFound naming every entry of `required` that has no column.
    pub fn resolve(headers: &[String], required: &[ProjectField]) -> Result<Self, LedgerError> {
        let mut columns = HashMap::new();
        for field in ProjectField::ALL {
            let matcher = field.header();
            if let Some(idx) = headers.iter().position(|h| matcher.matches(h)) {
                columns.insert(field, idx);
            }
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|f| !columns.contains_key(*f))
            .map(|f| f.header().describe())
            .collect();
        if !missing.is_empty() {
            return Err(LedgerError::NotFound(format!(
                "Required columns not found in header row: {}",
                missing.join(", ")
            )));
        }

        Ok(ColumnMap { columns })
    }

    pub fn index(&self, field: ProjectField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Index of a field listed as required at resolve time.
    pub fn required(&self, field: ProjectField) -> Result<usize, LedgerError> {
        self.index(field).ok_or_else(|| {
            LedgerError::NotFound(format!("Column {} not found", field.header().describe()))
        })
    }

    /// Trimmed cell for `field`, empty when the column or cell is missing.
    pub fn text(&self, row: &[String], field: ProjectField) -> String {
        self.index(field)
            .and_then(|idx| row.get(idx))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Like [`ColumnMap::text`] but `None` for blank cells.
    pub fn optional_text(&self, row: &[String], field: ProjectField) -> Option<String> {
        let value = self.text(row, field);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_is_case_insensitive_and_trimmed() {
        let map = ColumnMap::resolve(
            &headers(&["  CODIGO_BPIN_PROYECTO ", "valor", "Observaciones Ejecutadas"]),
            &[ProjectField::ProjectId, ProjectField::Observations],
        )
        .unwrap();
        assert_eq!(map.index(ProjectField::ProjectId), Some(0));
        assert_eq!(map.index(ProjectField::AuthorizedValue), Some(1));
        assert_eq!(map.index(ProjectField::Observations), Some(2));
        assert_eq!(map.index(ProjectField::Name), None);
    }

    #[test]
    fn test_exact_headers_do_not_match_substrings() {
        let map = ColumnMap::resolve(&headers(&["codigo_bpin_proyecto_old"]), &[]).unwrap();
        assert_eq!(map.index(ProjectField::ProjectId), None);
    }

    #[test]
    fn test_first_observations_column_wins() {
        let map = ColumnMap::resolve(&headers(&["id", "observ_a", "observ_b"]), &[]).unwrap();
        assert_eq!(map.index(ProjectField::Observations), Some(1));
    }

    #[test]
    fn test_missing_required_columns_are_all_listed() {
        let err = ColumnMap::resolve(
            &headers(&["nombre_del_proyecto"]),
            &[ProjectField::ProjectId, ProjectField::Observations],
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("codigo_bpin_proyecto"));
        assert!(msg.contains("*observ*"));
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[test]
    fn test_text_helpers_tolerate_short_rows() {
        let map = ColumnMap::resolve(&headers(&["codigo_bpin_proyecto", "rubro_atlas"]), &[]).unwrap();
        let row = vec![" 123 ".to_string()];
        assert_eq!(map.text(&row, ProjectField::ProjectId), "123");
        assert_eq!(map.optional_text(&row, ProjectField::AtlasLine), None);
        assert_eq!(map.text(&row, ProjectField::Name), "");
    }
}
