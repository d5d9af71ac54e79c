// Subject areas: a coarse keyword bucket for quiz names.
//
// This is a second catalog, much broader than the topic catalog, used when
// reporting by study area rather than by individual exam topic. It reuses
// the same first-match substring matcher, so the keyword order below is
// significant and the short keywords (UE, ONU, PAC) can fire inside longer
// words.

use std::sync::Arc;

use super::catalog::Catalog;
use super::matcher::TopicMatcher;
use super::traits::TopicClassifier;

/// Returned when no subject keyword matches.
pub const GENERAL_SUBJECT: &str = "GENERAL";

const SUBJECT_AREAS: &[(&str, &[&str])] = &[
    (
        "DERECHO CONSTITUCIONAL",
        &[
            "CONSTITU",
            "TÍTULO PRELIMINAR",
            "DERECHOS Y DEBERES",
            "CORONA",
            "CORTES GENERALES",
            "GOBIERNO Y ADMINISTRACIÓN",
            "PODER JUDICIAL",
            "ORGANIZACIÓN TERRITORIAL",
            "TRIBUNAL CONSTITUCIONAL",
            "REFORMA CONSTITUCIONAL",
        ],
    ),
    (
        "DERECHO ADMINISTRATIVO",
        &[
            "PROCEDIMIENTO ADMINISTRATIVO",
            "ACTO ADMINISTRATIVO",
            "RECURSOS ADMINISTRATIVOS",
            "CONTRATOS DEL SECTOR PÚBLICO",
            "EXPROPIACIÓN FORZOSA",
            "RESPONSABILIDAD PATRIMONIAL",
            "LEY 39/2015",
            "LEY 40/2015",
            "PAC",
            "LRJSP",
        ],
    ),
    (
        "UNION EUROPEA",
        &[
            "UNIÓN EUROPEA",
            "UE",
            "TRATADOS DE LA UNIÓN",
            "INSTITUCIONES DE LA UE",
            "PARLAMENTO EUROPEO",
            "CONSEJO EUROPEO",
            "COMISIÓN EUROPEA",
            "TRIBUNAL DE JUSTICIA DE LA UE",
            "BCE",
            "DERECHO DE LA UNIÓN",
        ],
    ),
    (
        "POLITICAS PUBLICAS",
        &[
            "IGUALDAD",
            "VIOLENCIA DE GÉNERO",
            "TRANSPARENCIA",
            "GOBIERNO ABIERTO",
            "AGENDA 2030",
            "DESARROLLO SOSTENIBLE",
            "DEPENDENCIA",
            "PROTECCIÓN DE DATOS",
        ],
    ),
    (
        "GESTION DE PERSONAL",
        &[
            "FUNCIÓN PÚBLICA",
            "EBEP",
            "PERSONAL LABORAL",
            "ACCESO AL EMPLEO PÚBLICO",
            "CARRERA PROFESIONAL",
            "RETRIBUCIONES",
            "INCOMPATIBILIDADES",
            "RÉGIMEN DISCIPLINARIO",
            "SEGURIDAD SOCIAL",
        ],
    ),
    (
        "GESTION FINANCIERA",
        &[
            "PRESUPUESTO",
            "HACIENDA PÚBLICA",
            "GASTO PÚBLICO",
            "INGRESOS PÚBLICOS",
            "CONTROL PRESUPUESTARIO",
            "ESTABILIDAD PRESUPUESTARIA",
        ],
    ),
    (
        "ORGANIZACION DEL ESTADO",
        &[
            "ORGANIZACIÓN DEL ESTADO",
            "ADMINISTRACIÓN GENERAL DEL ESTADO",
            "MINISTERIOS",
            "SECRETARÍAS DE ESTADO",
            "DELEGACIONES DEL GOBIERNO",
            "ADMINISTRACIÓN PERIFÉRICA",
            "ENTIDADES PÚBLICAS",
        ],
    ),
    (
        "DERECHO PENAL",
        &[
            "DERECHO PENAL",
            "DELITOS",
            "PENAS",
            "CÓDIGO PENAL",
            "DELITOS CONTRA LA ADMINISTRACIÓN",
        ],
    ),
    (
        "ORGANISMOS INTERNACIONALES",
        &[
            "ORGANISMOS INTERNACIONALES",
            "NACIONES UNIDAS",
            "ONU",
            "OTAN",
            "CONSEJO DE EUROPA",
            "OSCE",
            "ORGANIZACION SEGURIDAD COOPERACION EUROPA",
            "SEGURIDAD COOPERACION EUROPA",
            "ORGANIZACION SEGURIDAD",
            "COOPERACION EUROPA",
            "SEGURIDAD EUROPA",
        ],
    ),
];

/// Maps quiz names to broad subject areas.
#[derive(Debug, Clone)]
pub struct SubjectMapper {
    matcher: TopicMatcher,
}

impl Default for SubjectMapper {
    fn default() -> Self {
        Self {
            matcher: TopicMatcher::new(Arc::new(Self::catalog())),
        }
    }
}

impl SubjectMapper {
    /// The subject-area keyword catalog.
    pub fn catalog() -> Catalog {
        Catalog::from_table(SUBJECT_AREAS)
    }

    /// Subject area for a quiz name, `GENERAL` when no keyword matches.
    pub fn subject_for(&self, quiz_name: &str) -> String {
        self.matcher
            .classify(quiz_name)
            .map(|m| m.topic)
            .unwrap_or_else(|| GENERAL_SUBJECT.to_string())
    }
}
