//! Shared domain enums
//!
//! Every enum is persisted as TEXT using its display label, which is also the
//! JSON representation exchanged with the front office.

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Declares a closed, text-backed enum with serde, display, parsing and SQLx
/// conversions. Unknown labels fail to parse and fail to decode.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    _ => Err(format!("Invalid {} value: {}", stringify!($name), s)),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

text_enum! {
    /// Whether a piece of equipment is in service
    pub enum OperabilityStatus {
        Operable => "Operasional",
        NotOperable => "Tidak Operasional",
    }
}

text_enum! {
    /// Task priority
    pub enum TaskPriority {
        Low => "Rendah",
        Medium => "Sedang",
        High => "Tinggi",
    }
}

text_enum! {
    /// Task progress
    pub enum TaskStatus {
        NotStarted => "Belum Dikerjakan",
        InProgress => "Sedang Dikerjakan",
        Done => "Selesai",
    }
}

text_enum! {
    /// Complaint handling status
    pub enum ComplaintStatus {
        New => "Baru",
        InProgress => "Diproses",
        Done => "Selesai",
    }
}

text_enum! {
    /// Archive category of an uploaded file
    pub enum FileCategory {
        ManualBook => "Manual Book",
        Certificate => "Sertifikat",
        Report => "Laporan",
        Sop => "SOP",
        Other => "Lainnya",
    }
}

text_enum! {
    /// Account role. Stored in the normalized (uppercase, underscored) form.
    pub enum AccountRole {
        Admin => "ADMIN",
        User => "USER",
        Technician => "TEKNISI_ELBAN",
    }
}

text_enum! {
    /// Account approval status
    pub enum ApprovalStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

impl Default for OperabilityStatus {
    fn default() -> Self {
        OperabilityStatus::Operable
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::NotStarted
    }
}

impl Default for ComplaintStatus {
    fn default() -> Self {
        ComplaintStatus::New
    }
}

impl Default for FileCategory {
    fn default() -> Self {
        FileCategory::Other
    }
}
