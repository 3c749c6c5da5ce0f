macro_rules! define_object_id {
    ($id_type:ident) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $id_type([u8; $crate::storage::ids::OBJECT_ID_LEN]);

        impl $id_type {
            pub fn new() -> Self {
                Self($crate::storage::ids::generate_object_id())
            }

            pub fn bytes(&self) -> [u8; $crate::storage::ids::OBJECT_ID_LEN] {
                self.0
            }
        }

        impl Default for $id_type {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $id_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl std::str::FromStr for $id_type {
            type Err = $crate::storage::StorageError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut bytes = [0u8; $crate::storage::ids::OBJECT_ID_LEN];
                hex::decode_to_slice(s, &mut bytes)
                    .map_err($crate::storage::StorageError::ParseIdFromString)?;
                Ok(Self(bytes))
            }
        }

        impl serde::Serialize for $id_type {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $id_type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse::<Self>().map_err(serde::de::Error::custom)
            }
        }

        impl From<[u8; $crate::storage::ids::OBJECT_ID_LEN]> for $id_type {
            fn from(value: [u8; $crate::storage::ids::OBJECT_ID_LEN]) -> Self {
                Self(value)
            }
        }
    };
}
