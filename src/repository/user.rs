use diesel::prelude::*;

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::{DieselRepository, RepositoryResult, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .find(id.get())
            .select(DbUser::as_select())
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }

    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::username.eq(username.trim()))
            .select(DbUser::as_select())
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::email.eq(email.trim()))
            .select(DbUser::as_select())
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user: DbNewUser = user.into();

        let created = diesel::insert_into(users::table)
            .values(&db_user)
            .returning(DbUser::as_returning())
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
